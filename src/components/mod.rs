// UI Components
// Reusable components for the app

pub mod avatar;
pub mod facebook_login_button;
pub mod follow_button;
pub mod icons;
pub mod logout_modal;
pub mod notice_banner;
pub mod photo_grid;
pub mod profile_skeleton;
pub mod users_modal;

pub use avatar::Avatar;
pub use facebook_login_button::FacebookLoginButton;
pub use follow_button::FollowButton;
pub use logout_modal::LogoutModal;
pub use notice_banner::NoticeBanner;
pub use photo_grid::PhotoGrid;
pub use profile_skeleton::ProfileSkeleton;
pub use users_modal::UsersModal;
