mod attendance;
mod entry;
mod form;
mod meal_pref;
mod side;

pub use attendance::Attendance;
pub use entry::Entry;
pub use form::RsvpForm;
pub use meal_pref::MealPref;
pub use side::Side;
