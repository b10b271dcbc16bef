pub mod photo_card;
pub mod primary_button;
