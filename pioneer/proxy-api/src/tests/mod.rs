mod client;
mod factories;
