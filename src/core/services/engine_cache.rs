use std::sync::{Arc, Mutex, MutexGuard};

use crate::core::errors::EngineNotFoundError;
use crate::core::interfaces::adapters::EngineResolver;
use crate::core::models::OcrEngineHandle;
use crate::global_constants::LOG_TAG_ENGINE_LOCATOR;

/// Resolves the OCR engine once and hands out the cached handle afterwards.
///
/// `invalidate` drops the cached handle so the next lookup resolves again,
/// e.g. after the engine was uninstalled mid-session.
pub struct EngineCache {
    resolver: Arc<dyn EngineResolver>,
    cached: Mutex<Option<OcrEngineHandle>>,
}

impl EngineCache {
    pub fn new(resolver: Arc<dyn EngineResolver>) -> Self {
        Self {
            resolver,
            cached: Mutex::new(None),
        }
    }

    pub fn get_or_resolve(&self) -> Result<OcrEngineHandle, EngineNotFoundError> {
        let mut cached = self.lock_cached();

        if let Some(handle) = cached.as_ref() {
            log::debug!(
                "{} using cached engine at {:?}",
                LOG_TAG_ENGINE_LOCATOR,
                handle.executable()
            );
            return Ok(handle.clone());
        }

        match self.resolver.resolve() {
            Some(handle) => {
                log::info!(
                    "{} resolved engine at {:?} ({})",
                    LOG_TAG_ENGINE_LOCATOR,
                    handle.executable(),
                    handle.source()
                );
                *cached = Some(handle.clone());
                Ok(handle)
            }
            None => {
                let searched = self.resolver.searched_locations();
                log::error!(
                    "{} no OCR engine found, searched: {:?}",
                    LOG_TAG_ENGINE_LOCATOR,
                    searched
                );
                Err(EngineNotFoundError { searched })
            }
        }
    }

    #[allow(dead_code)]
    pub fn cached_handle(&self) -> Option<OcrEngineHandle> {
        self.lock_cached().clone()
    }

    pub fn invalidate(&self) {
        if self.lock_cached().take().is_some() {
            log::warn!("{} cached engine handle invalidated", LOG_TAG_ENGINE_LOCATOR);
        }
    }

    fn lock_cached(&self) -> MutexGuard<'_, Option<OcrEngineHandle>> {
        self.cached
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
