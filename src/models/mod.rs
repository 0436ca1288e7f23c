mod favourites;
mod product;
mod user;

pub use favourites::*;
pub use product::*;
pub use user::*;
