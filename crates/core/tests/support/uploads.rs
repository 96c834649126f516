//! Blob storage and transform fakes for upload pipeline tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use linkpage_core::{BlobStorage, CropArea, ImageTransform};
use linkpage_domain::{LinkpageError, Result as DomainResult};
use parking_lot::Mutex;

/// Bucket kept in a map; can be switched to fail every upload
#[derive(Default)]
pub struct MemoryBlobStorage {
    objects: Mutex<HashMap<String, (Vec<u8>, String)>>,
    fail: AtomicBool,
}

impl MemoryBlobStorage {
    pub fn failing() -> Self {
        let storage = Self::default();
        storage.fail.store(true, Ordering::SeqCst);
        storage
    }

    pub fn paths(&self) -> Vec<String> {
        self.objects.lock().keys().cloned().collect()
    }

    pub fn object(&self, path: &str) -> Option<(Vec<u8>, String)> {
        self.objects.lock().get(path).cloned()
    }
}

#[async_trait]
impl BlobStorage for MemoryBlobStorage {
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> DomainResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(LinkpageError::Storage("bucket quota exceeded".to_string()));
        }
        self.objects.lock().insert(path.to_string(), (bytes, content_type.to_string()));
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("https://cdn.test/public/{path}")
    }
}

/// Transform returning fixed bytes and counting calls
#[derive(Default)]
pub struct FixedTransform {
    pub calls: AtomicUsize,
    pub last_area: Mutex<Option<CropArea>>,
}

impl ImageTransform for FixedTransform {
    fn square_crop(&self, _bytes: &[u8], area: Option<CropArea>) -> DomainResult<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_area.lock() = area;
        Ok(b"jpeg-bytes".to_vec())
    }
}
