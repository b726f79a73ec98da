use serde::Serialize;

use super::Notice;
use crate::models::ServiceListing;

/// Vista de anuncios: colección en memoria + detalle abierto
///
/// La colección solo contiene anuncios de `category`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListingsView {
    pub category: String,
    pub listings: Vec<ServiceListing>,
    pub selected: Option<i64>,
    pub loading: bool,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListingsEvent {
    LoadStarted,
    Loaded(Vec<ServiceListing>),
    LoadFailed(String),
    Created(ServiceListing),
    Updated(ServiceListing),
    Deleted(i64),
    DetailOpened(i64),
    OperationFailed(String),
}

impl ListingsView {
    pub fn new(category: &str) -> Self {
        Self {
            category: category.to_string(),
            ..Default::default()
        }
    }

    pub fn apply(mut self, event: ListingsEvent) -> Self {
        match event {
            ListingsEvent::LoadStarted => {
                self.loading = true;
                self.notice = None;
            }
            ListingsEvent::Loaded(listings) => {
                self.loading = false;
                if self.selected.map_or(false, |id| !listings.iter().any(|l| l.id == id)) {
                    self.selected = None;
                }
                self.listings = listings;
            }
            ListingsEvent::LoadFailed(message) | ListingsEvent::OperationFailed(message) => {
                self.loading = false;
                self.notice = Some(Notice::error(message));
            }
            ListingsEvent::Created(listing) => {
                self.notice = Some(Notice::info(format!("Listing '{}' added", listing.name)));
                if listing.listing_type == self.category {
                    self.listings.push(listing);
                }
            }
            ListingsEvent::Updated(listing) => {
                self.notice = Some(Notice::info(format!("Listing '{}' updated", listing.name)));
                if listing.listing_type != self.category {
                    // cambió de tipo: sale de la colección
                    self.listings.retain(|l| l.id != listing.id);
                    if self.selected == Some(listing.id) {
                        self.selected = None;
                    }
                } else if let Some(slot) = self.listings.iter_mut().find(|l| l.id == listing.id) {
                    *slot = listing;
                }
            }
            ListingsEvent::Deleted(id) => {
                self.listings.retain(|l| l.id != id);
                if self.selected == Some(id) {
                    self.selected = None;
                }
                self.notice = Some(Notice::info("Listing deleted"));
            }
            ListingsEvent::DetailOpened(id) => {
                if self.listings.iter().any(|l| l.id == id) {
                    self.selected = Some(id);
                }
            }
        }
        self
    }

    pub fn find(&self, id: i64) -> Option<&ServiceListing> {
        self.listings.iter().find(|l| l.id == id)
    }
}
