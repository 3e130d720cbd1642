pub mod dates;
pub mod draft;
pub mod trip;
