//! Operations on a loaded subscriber list.

use crate::subscriber::types::Subscriber;

/// Activate `phone`, adding a record if it has none.
pub fn subscribe(subscribers: &mut Vec<Subscriber>, phone: &str) {
    match subscribers.iter_mut().find(|s| s.phone == phone) {
        Some(existing) => existing.active = true,
        None => subscribers.push(Subscriber::new(phone)),
    }
}

/// Deactivate every record for `phone`. Unknown numbers are left alone.
pub fn unsubscribe(subscribers: &mut [Subscriber], phone: &str) {
    for subscriber in subscribers.iter_mut().filter(|s| s.phone == phone) {
        subscriber.active = false;
    }
}

/// Whether `phone` has an active record.
pub fn is_subscribed(subscribers: &[Subscriber], phone: &str) -> bool {
    subscribers.iter().any(|s| s.phone == phone && s.active)
}

/// Phone numbers of all active records, in list order.
pub fn active_phones(subscribers: &[Subscriber]) -> Vec<&str> {
    subscribers
        .iter()
        .filter(|s| s.active)
        .map(|s| s.phone.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_new_phone() {
        let mut subs = Vec::new();
        subscribe(&mut subs, "+1555");
        assert_eq!(subs, vec![Subscriber::new("+1555")]);
    }

    #[test]
    fn test_subscribe_reactivates_existing() {
        let mut subs = vec![Subscriber::inactive("+1555")];
        subscribe(&mut subs, "+1555");
        assert_eq!(subs, vec![Subscriber::new("+1555")]);
    }

    #[test]
    fn test_subscribe_twice_keeps_one_record() {
        let mut subs = Vec::new();
        subscribe(&mut subs, "+1555");
        subscribe(&mut subs, "+1555");
        assert_eq!(subs.len(), 1);
    }

    #[test]
    fn test_unsubscribe_marks_inactive() {
        let mut subs = vec![Subscriber::new("+1555"), Subscriber::new("+1666")];
        unsubscribe(&mut subs, "+1555");
        assert!(!subs[0].active);
        assert!(subs[1].active);
    }

    #[test]
    fn test_unsubscribe_unknown_is_noop() {
        let mut subs = vec![Subscriber::new("+1666")];
        unsubscribe(&mut subs, "+1555");
        assert_eq!(subs, vec![Subscriber::new("+1666")]);
    }

    #[test]
    fn test_unsubscribe_all_duplicates() {
        let mut subs = vec![Subscriber::new("+1555"), Subscriber::new("+1555")];
        unsubscribe(&mut subs, "+1555");
        assert!(subs.iter().all(|s| !s.active));
    }

    #[test]
    fn test_is_subscribed() {
        let subs = vec![Subscriber::new("+1555"), Subscriber::inactive("+1666")];
        assert!(is_subscribed(&subs, "+1555"));
        assert!(!is_subscribed(&subs, "+1666"));
        assert!(!is_subscribed(&subs, "+1777"));
    }

    #[test]
    fn test_active_phones() {
        let subs = vec![
            Subscriber::new("+1"),
            Subscriber::inactive("+2"),
            Subscriber::new("+3"),
        ];
        assert_eq!(active_phones(&subs), vec!["+1", "+3"]);
    }
}
