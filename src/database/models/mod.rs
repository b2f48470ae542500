pub mod booking;
pub mod checklist;
pub mod flight;
pub mod todo;
pub mod token;
pub mod user;

pub use booking::{Booking, Passenger};
pub use checklist::{Checklist, ChecklistItem};
pub use flight::Flight;
pub use todo::Todo;
pub use token::AccessToken;
pub use user::User;
