mod machine;
mod validators;
