mod call;
mod event;
mod state;
mod state_change;

pub use pioneer_primitives::types::{
	AccountId,
	BlockCount,
	Member,
	MemberId,
	TokenAmount,
	TransactionEvent,
	TransactionStatus,
};

pub use self::{
	call::*,
	event::*,
	state::*,
	state_change::*,
};
