//! Shared test helpers: scripted backends and a throwaway HTTP server

use crate::coord::BoundingBox;
use crate::error::Result;
use crate::geo::{GeoBackend, GeoLocation};
use crate::imagery::{ImageReference, ImageryBackend};
use axum::Router;
use std::sync::Mutex;

type ForwardFn = dyn Fn(&str) -> Result<Option<GeoLocation>> + Send + Sync;
type ReverseFn = dyn Fn(f64, f64) -> Result<Option<GeoLocation>> + Send + Sync;
type ImagesFn = dyn Fn(&BoundingBox) -> Result<Option<ImageReference>> + Send + Sync;

/// Serve `router` on an ephemeral local port and return its base URL
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Successful geocoding reply
pub fn geo_hit(lat: f64, lng: f64) -> Result<Option<GeoLocation>> {
    Ok(Some(GeoLocation {
        lat,
        lng,
        display_name: format!("{}, {}", lat, lng),
    }))
}

/// Geocoder that answers from closures and records every request
pub struct FakeGeocoder {
    forward: Box<ForwardFn>,
    reverse: Box<ReverseFn>,
    queries: Mutex<Vec<String>>,
    reverse_calls: Mutex<Vec<(f64, f64)>>,
}

impl FakeGeocoder {
    pub fn new(forward: impl Fn(&str) -> Result<Option<GeoLocation>> + Send + Sync + 'static) -> Self {
        Self {
            forward: Box::new(forward),
            reverse: Box::new(|_, _| Ok(None)),
            queries: Mutex::new(Vec::new()),
            reverse_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_reverse(
        mut self,
        reverse: impl Fn(f64, f64) -> Result<Option<GeoLocation>> + Send + Sync + 'static,
    ) -> Self {
        self.reverse = Box::new(reverse);
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn reverse_calls(&self) -> Vec<(f64, f64)> {
        self.reverse_calls.lock().unwrap().clone()
    }
}

impl GeoBackend for FakeGeocoder {
    async fn geocode(&self, query: &str) -> Result<Option<GeoLocation>> {
        self.queries.lock().unwrap().push(query.to_string());
        (self.forward)(query)
    }

    async fn reverse_geocode(&self, lat: f64, lng: f64) -> Result<Option<GeoLocation>> {
        self.reverse_calls.lock().unwrap().push((lat, lng));
        (self.reverse)(lat, lng)
    }
}

/// Imagery index that answers from a closure and records every box
pub struct FakeImagery {
    respond: Box<ImagesFn>,
    boxes: Mutex<Vec<BoundingBox>>,
}

impl FakeImagery {
    pub fn new(
        respond: impl Fn(&BoundingBox) -> Result<Option<ImageReference>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            respond: Box::new(respond),
            boxes: Mutex::new(Vec::new()),
        }
    }

    pub fn boxes(&self) -> Vec<BoundingBox> {
        self.boxes.lock().unwrap().clone()
    }
}

impl ImageryBackend for FakeImagery {
    async fn first_image(&self, bbox: &BoundingBox) -> Result<Option<ImageReference>> {
        self.boxes.lock().unwrap().push(*bbox);
        (self.respond)(bbox)
    }
}
