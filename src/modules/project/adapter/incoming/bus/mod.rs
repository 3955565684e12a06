pub mod router;

pub use router::BusRouter;
