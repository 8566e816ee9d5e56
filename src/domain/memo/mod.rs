//! Memo session domain module

mod session;

pub use session::{
    EventEffect, InvalidStateTransition, MemoEvent, MemoSession, MemoSnapshot, MemoState,
};
