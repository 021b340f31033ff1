pub mod country;
pub mod ids;
pub mod language;
pub mod phone;
pub mod region;
pub mod user;

pub use country::{country_code, country_name};
pub use ids::UserId;
pub use language::Language;
pub use phone::{PhoneDetails, PhoneFormat, PhoneQuery};
pub use region::RegionCode;
pub use user::{normalize_user_name, Session, UserProfile};
