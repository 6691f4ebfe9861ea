//! Message transport trait

/// Outgoing message transport (e.g. MQTT)
///
/// Topics are relative to the device topic; the transport adds its prefix.
pub trait Publisher {
    /// Check if messages can be delivered right now
    fn is_connected(&self) -> bool {
        true
    }

    /// Publish a payload on a relative topic
    fn publish(&mut self, topic: &str, payload: &str);
}
