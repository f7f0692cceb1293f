use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::ueformat::world::MeshKey;
use crate::ueformat::{Diagnostics, HashedMesh, Model, Result};

type Slot = Arc<Mutex<Option<Arc<Model>>>>;

/// Decode-once store for hashed meshes, safe to share across threads.
///
/// Slots are keyed by hash plus the decode settings a [`HashedMesh`] carries,
/// so worlds decoded at different scales can share one cache. The outer lock
/// only hands out slots. A slot stays
/// locked while its mesh decodes, so concurrent callers for the same key wait
/// for the first decode instead of repeating it.
#[derive(Debug, Default)]
pub struct MeshCache {
	slots: Mutex<HashMap<MeshKey, Slot>>,
}

impl MeshCache {
	/// Create an empty cache.
	pub fn new() -> Self {
		Self::default()
	}

	/// Return the model for `mesh`, decoding it on first request.
	pub fn get_or_decode(&self, mesh: &HashedMesh<'_>, diagnostics: &dyn Diagnostics) -> Result<Arc<Model>> {
		let slot = {
			let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
			Arc::clone(slots.entry(mesh.cache_key()).or_default())
		};

		let mut entry = slot.lock().unwrap_or_else(PoisonError::into_inner);
		if let Some(model) = entry.as_ref() {
			return Ok(Arc::clone(model));
		}

		tracing::debug!(hash = mesh.hash, bytes = mesh.model_size, "decoding hashed mesh");
		let model = Arc::new(mesh.decode_model(diagnostics)?);
		*entry = Some(Arc::clone(&model));
		Ok(model)
	}

	/// Return the model for `mesh` if it was already decoded.
	pub fn get(&self, mesh: &HashedMesh<'_>) -> Option<Arc<Model>> {
		let slot = {
			let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
			Arc::clone(slots.get(&mesh.cache_key())?)
		};
		let entry = slot.lock().unwrap_or_else(PoisonError::into_inner);
		entry.clone()
	}

	/// Number of decoded models.
	pub fn len(&self) -> usize {
		let slots: Vec<Slot> = self.slots.lock().unwrap_or_else(PoisonError::into_inner).values().cloned().collect();
		slots
			.iter()
			.filter(|slot| slot.lock().unwrap_or_else(PoisonError::into_inner).is_some())
			.count()
	}

	/// Whether nothing has been decoded yet.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}
