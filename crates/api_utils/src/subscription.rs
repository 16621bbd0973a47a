use lexportal_db_schema::newtypes::LocalUserId;
use lexportal_db_views_submission::SubmissionRecord;
use std::{collections::HashMap, sync::Mutex};
use tokio::sync::broadcast;

/// Buffered updates per subscriber before a slow consumer starts losing
/// the oldest ones.
const CHANNEL_CAPACITY: usize = 32;

/// In-process fan-out of finalized submissions, one broadcast channel per
/// owner. Webhook-driven finalization lands here so a client waiting on a
/// redirect payment learns about the new record without polling.
#[derive(Default)]
pub struct SubscriptionHub {
  channels: Mutex<HashMap<LocalUserId, broadcast::Sender<SubmissionRecord>>>,
}

impl SubscriptionHub {
  pub fn subscribe(&self, owner_id: LocalUserId) -> broadcast::Receiver<SubmissionRecord> {
    let mut channels = self.channels.lock().unwrap_or_else(|e| e.into_inner());
    channels
      .entry(owner_id)
      .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
      .subscribe()
  }

  /// Deliver a record to the owner's subscribers, if any. Publishing with
  /// nobody listening is a no-op and drops the channel.
  pub fn publish(&self, record: &SubmissionRecord) {
    let owner_id = record.owner_id();
    let mut channels = self.channels.lock().unwrap_or_else(|e| e.into_inner());
    if let Some(sender) = channels.get(&owner_id) {
      if sender.send(record.clone()).is_err() {
        channels.remove(&owner_id);
      }
    }
  }

  pub fn subscriber_count(&self, owner_id: LocalUserId) -> usize {
    let channels = self.channels.lock().unwrap_or_else(|e| e.into_inner());
    channels
      .get(&owner_id)
      .map(|s| s.receiver_count())
      .unwrap_or(0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use lexportal_db_schema::{
    newtypes::DocumentReviewId,
    source::document_review::DocumentReview,
  };
  use lexportal_db_schema_file::enums::{DocumentType, PaymentMethod, SubmissionStatus};
  use pretty_assertions::assert_eq;

  fn record_for(owner_id: LocalUserId) -> SubmissionRecord {
    SubmissionRecord::DocumentReview {
      document_review: DocumentReview {
        id: DocumentReviewId(1),
        owner_id,
        name: "Maria Santos".to_string(),
        email: "maria@example.com".to_string(),
        phone: None,
        document_type: DocumentType::Lease,
        additional_details: None,
        document_name: "lease.pdf".to_string(),
        document_url: "/files/x".to_string(),
        document_content_type: "application/pdf".to_string(),
        document_size: 100,
        status: SubmissionStatus::Pending,
        paid: true,
        payment_id: "pay_1".to_string(),
        payment_amount: 500.0,
        payment_method: PaymentMethod::Gcash,
        created_at: chrono::Utc::now(),
        updated_at: chrono::Utc::now(),
      },
    }
  }

  #[tokio::test]
  async fn test_only_owner_receives() {
    let hub = SubscriptionHub::default();
    let mut owner_rx = hub.subscribe(LocalUserId(1));
    let mut other_rx = hub.subscribe(LocalUserId(2));

    hub.publish(&record_for(LocalUserId(1)));

    let received = owner_rx.recv().await.expect("owner receives the record");
    assert_eq!(LocalUserId(1), received.owner_id());
    assert!(other_rx.try_recv().is_err());
  }

  #[tokio::test]
  async fn test_publish_without_subscribers_is_noop() {
    let hub = SubscriptionHub::default();
    hub.publish(&record_for(LocalUserId(9)));
    assert_eq!(0, hub.subscriber_count(LocalUserId(9)));
  }
}
