//! Advances a single entity by one step.

use std::mem;
use std::rc::Rc;

use super::context::Context;
use super::registry::Active;
use super::state::State;
use super::tracer::Tracer;
use crate::behavior::Behavior;
use crate::entity::Lifecycle;
use crate::Entity;

/// Steps `entity` once.
///
/// 1. A new entity runs its `start` behavior and becomes live; a live entity runs `update`.
/// 2. Every suspended call whose delay has finished is resumed once.
///    A call that yields a new delay keeps running with that delay;
///    a call that yields `None` is dropped.
/// 3. Every behavior queued before this point is started.
///    Routines run to completion; procedures are resumed for the first time
///    and kept only if they suspend.
///
/// Behaviors queued while phases 2 and 3 run stay queued for the next step.
/// Once the entity is deleted, nothing else of it is advanced.
pub(crate) fn step(state: &mut State, tracer: &dyn Tracer, entity: Entity) {
    let Some(object) = state.registry.get_mut(entity) else { return };
    if object.lifecycle == Lifecycle::Dead {
        return;
    }

    tracer.step_entity(entity);

    let kind = Rc::clone(&object.kind);
    let is_new = object.lifecycle == Lifecycle::New;

    let mut cx = Context::new(state, entity, tracer);

    let entry = if is_new { &kind.start } else { &kind.update };
    if let Some(behavior) = entry {
        cx.run(behavior.clone());
    }

    if is_new {
        if let Some(object) = cx.state.registry.get_mut(entity) {
            if object.lifecycle == Lifecycle::New {
                object.lifecycle = Lifecycle::Live;
            }
        }
    }

    let Some(active) = take(&mut cx, entity, |object| &mut object.active) else { return };
    let mut calls = Vec::with_capacity(active.len());
    for mut active in active {
        if !is_alive(&cx, entity) {
            break;
        }

        if !active.delay.is_finished() {
            calls.push(active);
            continue;
        }

        tracer.start_call(entity, active.name);
        match active.call.resume(&mut cx) {
            Some(mut delay) => {
                delay.mark_used();
                active.delay = delay;
                calls.push(active);
            }
            None => tracer.finish_call(entity, active.name),
        }
    }

    let Some(pending) = take(&mut cx, entity, |object| &mut object.pending) else { return };
    for behavior in pending {
        if !is_alive(&cx, entity) {
            break;
        }

        match behavior {
            Behavior::Routine(routine) => routine.call(&mut cx),
            Behavior::Procedure(procedure) => {
                let name = procedure.debug_name();
                let mut call = procedure.bind();

                tracer.start_call(entity, name);
                match call.resume(&mut cx) {
                    Some(mut delay) => {
                        delay.mark_used();
                        calls.push(Active { call, delay, name });
                    }
                    None => tracer.finish_call(entity, name),
                }
            }
        }
    }

    if let Some(object) = cx.state.registry.get_mut(entity) {
        debug_assert!(object.active.is_empty(), "active calls are only installed by step");
        object.active = calls;
    }
}

fn take<T: Default>(
    cx: &mut Context<'_>,
    entity: Entity,
    field: impl FnOnce(&mut super::registry::Object) -> &mut T,
) -> Option<T> {
    let object = cx.state.registry.get_mut(entity)?;
    Some(mem::take(field(object)))
}

fn is_alive(cx: &Context<'_>, entity: Entity) -> bool {
    cx.state.registry.lifecycle(entity).map_or(false, Lifecycle::is_alive)
}
