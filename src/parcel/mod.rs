//! Named parcel records and the session store that owns them.

mod store;

pub use store::{Parcel, ParcelStore, PendingDrawing};
