use skyroute_core::{FlightOfferSource, ItinerarySearchEngine, SearchOptions};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ItinerarySearchEngine>,
    pub offers: Arc<dyn FlightOfferSource>,
    /// Operator defaults; request parameters override field by field.
    pub search_defaults: SearchOptions,
}

impl AppState {
    pub fn new(offers: Arc<dyn FlightOfferSource>, search_defaults: SearchOptions) -> Self {
        Self {
            engine: Arc::new(ItinerarySearchEngine::new(offers.clone())),
            offers,
            search_defaults,
        }
    }
}
