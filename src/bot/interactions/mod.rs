pub mod summary_buttons;
