// Guided application interview: chooses the next question for the agent to ask.

pub mod handlers;
pub mod selector;
