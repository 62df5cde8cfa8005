pub mod director;
pub mod genre;
pub mod movie;
pub mod user;

pub use director::Director;
pub use genre::Genre;
pub use movie::Movie;
pub use user::User;
