use crate::error::MaterializeError;
use crate::payload::{Payload, WorkOrder, WorkOrderId};
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;
use tracing::warn;

/// Work orders keyed by normalized id, plus the orders nobody references as a child.
pub(super) struct WorkOrderIndex<'a> {
    by_id: AHashMap<String, &'a WorkOrder>,
    roots: Vec<&'a WorkOrder>,
}

impl<'a> WorkOrderIndex<'a> {
    pub(super) fn build(payload: &'a Payload) -> Result<Self, MaterializeError> {
        let mut by_id: AHashMap<String, &'a WorkOrder> =
            AHashMap::with_capacity(payload.work_orders.len());
        for order in &payload.work_orders {
            if by_id.insert(order.id.key(), order).is_some() {
                warn!(id = %order.id, "duplicate work order id, the later entry wins");
            }
        }

        let child_ids: AHashSet<String> = payload
            .work_orders
            .iter()
            .flat_map(|order| order.child_work_orders.iter().map(WorkOrderId::key))
            .collect();

        // Payload order, one entry per id, resolved through the index so a
        // duplicated root uses the entry that won.
        let roots: Vec<&'a WorkOrder> = payload
            .work_orders
            .iter()
            .map(|order| order.id.key())
            .unique()
            .filter(|key| !child_ids.contains(key))
            .filter_map(|key| by_id.get(&key).copied())
            .collect();

        if roots.is_empty() && !payload.is_empty() {
            return Err(MaterializeError::malformed(format!(
                "every one of the {} work orders is referenced as a child, so there is no root (cyclic or rootless structure)",
                payload.work_orders.len()
            )));
        }

        Ok(Self { by_id, roots })
    }

    pub(super) fn get(&self, id: &WorkOrderId) -> Option<&'a WorkOrder> {
        self.by_id.get(&id.key()).copied()
    }

    pub(super) fn roots(&self) -> &[&'a WorkOrder] {
        &self.roots
    }

    pub(super) fn len(&self) -> usize {
        self.by_id.len()
    }
}
