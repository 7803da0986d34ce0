pub mod categories;
pub mod championships;
pub mod competitions;
pub mod members;
pub mod records;
pub mod rounds;
pub mod sessions;
