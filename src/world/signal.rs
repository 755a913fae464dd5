//! Delivers named broadcast messages to receiving entities.
//!
//! Broadcasting never runs anything synchronously.
//! Each receiver behavior is queued on its entity and starts on that entity's next step,
//! which may still be in the current wave if the entity has not been stepped yet.

use super::state::State;
use super::tracer::Tracer;
use crate::kind::hook;

/// Queues the receivers of `message` on every committed, non-dead entity.
///
/// Returns the number of entities that received the message.
pub(crate) fn broadcast(state: &mut State, tracer: &dyn Tracer, message: &str) -> usize {
    let hook = hook::receive(message);

    let receivers: Vec<_> = state
        .registry
        .live()
        .filter(|&entity| {
            state.registry.get(entity).map_or(false, |object| {
                object.lifecycle.is_alive() && object.kind.has_hook(&hook)
            })
        })
        .collect();

    for &entity in &receivers {
        if let Some(object) = state.registry.get_mut(entity) {
            let behaviors = &object.kind.hooks[&hook];
            object.pending.extend(behaviors.iter().cloned());
        }
    }

    log::debug!("Broadcast {message:?} to {} entities", receivers.len());
    tracer.broadcast(message, receivers.len());
    receivers.len()
}
