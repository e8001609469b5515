//! Pure data structures. `Table`, `Order` and `Bill` are stored documents (see the
//! `*_actor` modules for their [`Document`](resource_store::Document) impls); the rest
//! are inputs read from outside collaborators.

pub mod bill;
pub mod cart;
pub mod identity;
pub mod menu;
pub mod order;
pub mod table;

pub use bill::*;
pub use cart::*;
pub use identity::*;
pub use menu::*;
pub use order::*;
pub use table::*;
