pub mod booking;
pub mod gallery;
pub mod review;
pub mod service_type;
pub mod user;

pub use booking::{Booking, BookingStatus, BookingUpdate, NewBooking};
pub use gallery::{GalleryImage, GalleryImageUpdate};
pub use review::{NewReview, Review};
pub use service_type::ServiceType;
pub use user::{NewUser, User, UserRole};
