pub mod news;
pub mod respond;
pub mod voice;
