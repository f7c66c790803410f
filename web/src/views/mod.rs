mod components;

mod login;
pub use login::Login;

mod dashboard;
pub use dashboard::Dashboard;

mod profile;
pub use profile::{EditProfile, Profile};

mod users;
pub use users::ManageUsers;
