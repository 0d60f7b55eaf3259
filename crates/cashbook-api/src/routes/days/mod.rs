//! Day routes: resolved day views and account edits
//!
//! A day with no saved data is shown carried forward from the closest
//! earlier day; writing to it saves it as a day of its own.

pub mod api;

pub use api::{
    add_account, delete_account, edit_account, get_day, list_days, update_account,
    DayListItem, DayResponse, EditRequest, EditTarget, TotalsResponse,
};
