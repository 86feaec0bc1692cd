pub mod practice_form;
pub mod result_card;
pub mod session_list;
pub mod stats_panel;
pub mod word_card;
