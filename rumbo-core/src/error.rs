use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Walking distance must be non-negative, got {0}")]
    InvalidDistance(f64),
    #[error("No schedule recorded for this trip segment")]
    MissingSchedule,
    #[error("No route found between the requested points")]
    NoRouteFound,
    #[error("Search expansion budget exhausted")]
    SearchTimeout,
    #[error("Itinerary predecessor chain did not reach a seed node")]
    BrokenChain,
    #[error("Invalid data: {0}")]
    InvalidData(String),
}
