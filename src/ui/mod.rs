pub mod components;
pub mod layout;
pub mod sentence_input;
pub mod theme;
