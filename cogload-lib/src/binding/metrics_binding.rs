use super::{BindingState, LOG_TARGET, Pipeline};
use crate::input::RawMetricInput;
use compact_str::CompactString;
use core::fmt::{Debug, Formatter};
use core::hash::{Hash, Hasher};
use serde_json::Value;
use std::hash::DefaultHasher;

/// Error shown when the binding is asked to work on absent input.
pub const NO_INPUT_MESSAGE: &str = "input data not provided";

type Listener = Box<dyn FnMut(&BindingState) + Send>;

/// Handle returned by [`MetricsBinding::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Owns the latest pipeline outcome and tells listeners when it changes.
///
/// The raw payload is never retained; only the last metric type and a 64-bit
/// fingerprint of the last payload are kept so that repeated `set` calls with
/// equal input do not recompute. A change of metric type always recomputes.
/// Two different payloads of the same type whose fingerprints collide are
/// treated as unchanged; that risk is accepted in exchange for not holding
/// on to caller data.
pub struct MetricsBinding {
    pipeline: Pipeline,
    state: BindingState,
    last_input: Option<(CompactString, u64)>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl Debug for MetricsBinding {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MetricsBinding")
            .field("pipeline", &self.pipeline)
            .field("state", &self.state)
            .field("last_input", &self.last_input)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl Default for MetricsBinding {
    fn default() -> Self {
        Self::new(Pipeline::default())
    }
}

impl MetricsBinding {
    #[must_use]
    pub const fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline,
            state: BindingState::pending(),
            last_input: None,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &BindingState {
        &self.state
    }

    /// Supply new input and recompute if it differs from the previous input.
    ///
    /// Listeners see the state twice per recomputation: once flagged as
    /// validating, then with the final outcome. Unchanged input notifies nobody.
    pub fn set(&mut self, raw: Option<&Value>, metric_type: &str) -> &BindingState {
        let current = fingerprint(raw);
        if let Some((last_type, last_fingerprint)) = &self.last_input
            && last_type == metric_type
            && *last_fingerprint == current
        {
            log::trace!(target: LOG_TARGET, "Input unchanged, keeping current state");
            return &self.state;
        }
        self.last_input = Some((CompactString::from(metric_type), current));

        self.state.is_validating = true;
        self.notify();

        self.state = match raw {
            None => {
                log::warn!(target: LOG_TARGET, "Metric validation failed: {NO_INPUT_MESSAGE}");
                BindingState::failed(NO_INPUT_MESSAGE.to_string())
            }
            Some(raw) => match self.pipeline.run(raw, metric_type) {
                Ok((validated, metrics)) => BindingState::succeeded(validated, metrics),
                Err(e) => {
                    log::warn!(target: LOG_TARGET, "Metric validation failed: {e}");
                    BindingState::failed(e.to_string())
                }
            },
        };

        self.notify();
        &self.state
    }

    /// Supply a `{kind, payload}` envelope.
    pub fn set_input(&mut self, input: &RawMetricInput) -> &BindingState {
        self.set(Some(&input.payload), &input.kind)
    }

    /// Register a listener called on every state change.
    pub fn subscribe(&mut self, listener: impl FnMut(&BindingState) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn notify(&mut self) {
        let state = &self.state;
        for (_, listener) in &mut self.listeners {
            listener(state);
        }
    }
}

fn fingerprint(raw: Option<&Value>) -> u64 {
    let mut hasher = DefaultHasher::new();
    match raw {
        None => 0u8.hash(&mut hasher),
        Some(value) => {
            1u8.hash(&mut hasher);
            hash_value(value, &mut hasher);
        }
    }
    hasher.finish()
}

fn hash_value<H: Hasher>(value: &Value, state: &mut H) {
    match value {
        Value::Null => 0u8.hash(state),
        Value::Bool(b) => {
            1u8.hash(state);
            b.hash(state);
        }
        Value::Number(n) => {
            2u8.hash(state);
            n.to_string().hash(state);
        }
        Value::String(s) => {
            3u8.hash(state);
            s.hash(state);
        }
        Value::Array(items) => {
            4u8.hash(state);
            items.len().hash(state);
            for item in items {
                hash_value(item, state);
            }
        }
        Value::Object(map) => {
            5u8.hash(state);
            map.len().hash(state);
            for (key, item) in map {
                key.hash(state);
                hash_value(item, state);
            }
        }
    }
}
