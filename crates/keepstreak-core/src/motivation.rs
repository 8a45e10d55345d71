//! Daily motivation delivery

use chrono::{DateTime, Local, NaiveDate};
use keepstreak_api::{MotivationState, MotivationalMessage};
use keepstreak_config::MotivationDefaults;
use keepstreak_store::{KvStore, MOTIVATION_KEY, load_document, save_document};
use keepstreak_util::calendar_day;
use rand::prelude::*;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::{CoreEvent, ScheduledTask};

/// Title of the desktop notification carrying the daily quote
pub const NOTIFICATION_TITLE: &str = "Daily Motivation";

/// Themed quotes, four per theme
pub const THEMED_QUOTES: [(&str, [&str; 4]); 4] = [
    (
        "Self-Control",
        [
            "The first and greatest victory is to conquer yourself.",
            "Self-control is strength. Calmness is mastery.",
            "Your future depends on what you do today.",
            "Discipline is choosing between what you want now and what you want most.",
        ],
    ),
    (
        "Personal Growth",
        [
            "Small daily improvements are the key to staggering long-term results.",
            "The only person you should try to be better than is who you were yesterday.",
            "Growth is painful. Change is painful. But nothing is as painful as staying stuck.",
            "Your potential is the sum of all the possibilities of your life.",
        ],
    ),
    (
        "Resilience",
        [
            "The struggle you're in today is developing the strength you need for tomorrow.",
            "Rock bottom became the solid foundation on which I rebuilt my life.",
            "Your hardest times often lead to the greatest moments of your life.",
            "Strength doesn't come from what you can do. It comes from overcoming what you thought you couldn't.",
        ],
    ),
    (
        "Mindfulness",
        [
            "The present moment is the only moment available to us.",
            "Peace comes from within. Do not seek it without.",
            "Your calm mind is the ultimate weapon against your challenges.",
            "Mindfulness isn't difficult. We just need to remember to do it.",
        ],
    ),
];

/// Desktop notification permission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPermission {
    Granted,
    Denied,
    /// Not asked yet
    Default,
}

/// Desktop notification collaborator
pub trait Notifier: Send {
    fn permission(&self) -> NotificationPermission;

    /// Ask for permission, returning the outcome
    fn request_permission(&mut self) -> NotificationPermission;

    fn notify(&self, title: &str, body: &str);
}

/// Pick a random theme, then a random quote within it
pub fn random_message<R: Rng + ?Sized>(rng: &mut R) -> MotivationalMessage {
    let (theme, quotes) = THEMED_QUOTES[rng.gen_range(0..THEMED_QUOTES.len())];
    let quote = quotes[rng.gen_range(0..quotes.len())];
    MotivationalMessage {
        quote: quote.into(),
        theme: theme.into(),
    }
}

/// One themed quote per calendar day for subscribers
pub struct DailyMotivation {
    kv: Arc<dyn KvStore>,
    state: MotivationState,
    notifier: Box<dyn Notifier>,
    rng: StdRng,
}

impl DailyMotivation {
    pub fn new(kv: Arc<dyn KvStore>, defaults: &MotivationDefaults, notifier: Box<dyn Notifier>) -> Self {
        Self::with_rng(kv, defaults, notifier, StdRng::from_entropy())
    }

    /// Like [`DailyMotivation::new`] with a caller-supplied random source
    pub fn with_rng(
        kv: Arc<dyn KvStore>,
        defaults: &MotivationDefaults,
        notifier: Box<dyn Notifier>,
        rng: StdRng,
    ) -> Self {
        let state = match load_document::<MotivationState>(kv.as_ref(), MOTIVATION_KEY) {
            Ok(Some(state)) => state,
            Ok(None) => {
                let state = defaults.initial_state();
                if let Err(e) = save_document(kv.as_ref(), MOTIVATION_KEY, &state) {
                    error!(error = %e, "Error saving motivation settings");
                }
                state
            }
            Err(e) => {
                error!(error = %e, "Error loading motivation settings, using defaults");
                defaults.initial_state()
            }
        };

        debug!(
            subscribed = state.is_subscribed,
            last_delivered = ?state.last_delivered,
            "Daily motivation loaded"
        );

        Self {
            kv,
            state,
            notifier,
            rng,
        }
    }

    pub fn state(&self) -> &MotivationState {
        &self.state
    }

    pub fn is_subscribed(&self) -> bool {
        self.state.is_subscribed
    }

    pub fn todays_message(&self) -> Option<&MotivationalMessage> {
        self.state.todays_message.as_ref()
    }

    pub fn last_delivered(&self) -> Option<NaiveDate> {
        self.state.last_delivered
    }

    /// Deliver a new message if subscribed and nothing was delivered on
    /// `now`'s calendar day yet
    pub fn deliver_if_due(&mut self, now: DateTime<Local>) -> Option<MotivationalMessage> {
        if !self.state.is_subscribed {
            return None;
        }

        let today = calendar_day(&now);
        if self.state.last_delivered == Some(today) {
            return None;
        }

        let message = random_message(&mut self.rng);
        self.state.last_delivered = Some(today);
        self.state.todays_message = Some(message.clone());
        self.persist();

        info!(theme = %message.theme, %today, "Daily message delivered");

        if self.notifier.permission() == NotificationPermission::Granted {
            self.notifier.notify(NOTIFICATION_TITLE, &message.quote);
        }

        Some(message)
    }

    /// Flip the subscription. Subscribing asks for notification permission
    /// first; if it is not granted nothing changes. Returns the resulting
    /// subscription state.
    pub fn toggle_subscription(&mut self) -> bool {
        if !self.state.is_subscribed && self.notifier.permission() != NotificationPermission::Granted {
            let permission = self.notifier.request_permission();
            if permission != NotificationPermission::Granted {
                warn!(?permission, "Notification permission not granted, staying unsubscribed");
                return false;
            }
        }

        self.state.is_subscribed = !self.state.is_subscribed;
        self.persist();

        info!(subscribed = self.state.is_subscribed, "Daily motivation subscription changed");
        self.state.is_subscribed
    }

    fn persist(&self) {
        if let Err(e) = save_document(self.kv.as_ref(), MOTIVATION_KEY, &self.state) {
            error!(error = %e, "Error saving motivation settings");
        }
    }
}

impl ScheduledTask for DailyMotivation {
    fn name(&self) -> &'static str {
        "daily-motivation"
    }

    fn tick(&mut self, now: DateTime<Local>) -> Vec<CoreEvent> {
        self.deliver_if_due(now)
            .map(CoreEvent::DailyMessageDelivered)
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use keepstreak_store::MemoryKvStore;
    use std::sync::Mutex;

    #[derive(Clone)]
    struct RecordingNotifier {
        permission: NotificationPermission,
        answer: NotificationPermission,
        sent: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl RecordingNotifier {
        fn new(permission: NotificationPermission, answer: NotificationPermission) -> Self {
            Self {
                permission,
                answer,
                sent: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl Notifier for RecordingNotifier {
        fn permission(&self) -> NotificationPermission {
            self.permission
        }

        fn request_permission(&mut self) -> NotificationPermission {
            self.permission = self.answer;
            self.answer
        }

        fn notify(&self, title: &str, body: &str) {
            self.sent.lock().unwrap().push((title.into(), body.into()));
        }
    }

    fn at(d: u32, h: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 8, d, h, 0, 0).unwrap()
    }

    fn make_motivation(notifier: RecordingNotifier, subscribed: bool) -> (DailyMotivation, Arc<MemoryKvStore>) {
        let kv = Arc::new(MemoryKvStore::new());
        let motivation = DailyMotivation::with_rng(
            kv.clone(),
            &MotivationDefaults { subscribed },
            Box::new(notifier),
            StdRng::seed_from_u64(7),
        );
        (motivation, kv)
    }

    fn is_known(message: &MotivationalMessage) -> bool {
        THEMED_QUOTES
            .iter()
            .any(|(theme, quotes)| *theme == message.theme && quotes.contains(&message.quote.as_str()))
    }

    #[test]
    fn test_one_message_per_day() {
        let notifier = RecordingNotifier::new(NotificationPermission::Granted, NotificationPermission::Granted);
        let sent = notifier.sent.clone();
        let (mut motivation, _) = make_motivation(notifier, true);

        let first = motivation.deliver_if_due(at(3, 8)).unwrap();
        assert!(is_known(&first));
        assert_eq!(motivation.last_delivered(), Some(calendar_day(&at(3, 8))));
        assert!(motivation.deliver_if_due(at(3, 23)).is_none());
        assert_eq!(motivation.todays_message(), Some(&first));

        assert!(motivation.deliver_if_due(at(4, 0)).is_some());

        let sent = sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].0, NOTIFICATION_TITLE);
        assert_eq!(sent[0].1, first.quote);
    }

    #[test]
    fn test_no_notification_without_permission() {
        let notifier = RecordingNotifier::new(NotificationPermission::Default, NotificationPermission::Denied);
        let sent = notifier.sent.clone();
        let (mut motivation, _) = make_motivation(notifier, true);

        assert!(motivation.deliver_if_due(at(3, 8)).is_some());
        assert!(sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unsubscribed_gets_nothing() {
        let notifier = RecordingNotifier::new(NotificationPermission::Granted, NotificationPermission::Granted);
        let (mut motivation, _) = make_motivation(notifier, false);

        assert!(motivation.tick(at(3, 8)).is_empty());
        assert!(motivation.todays_message().is_none());
    }

    #[test]
    fn test_denied_permission_keeps_unsubscribed() {
        let notifier = RecordingNotifier::new(NotificationPermission::Default, NotificationPermission::Denied);
        let (mut motivation, kv) = make_motivation(notifier, false);
        let writes = kv.write_count();

        assert!(!motivation.toggle_subscription());
        assert!(!motivation.is_subscribed());
        assert_eq!(kv.write_count(), writes);
    }

    #[test]
    fn test_subscribe_then_unsubscribe() {
        let notifier = RecordingNotifier::new(NotificationPermission::Default, NotificationPermission::Granted);
        let (mut motivation, kv) = make_motivation(notifier, false);

        assert!(motivation.toggle_subscription());
        assert!(!motivation.toggle_subscription());

        // Unsubscribing never asks
        let reloaded = DailyMotivation::new(
            kv,
            &MotivationDefaults::default(),
            Box::new(RecordingNotifier::new(
                NotificationPermission::Denied,
                NotificationPermission::Denied,
            )),
        );
        assert!(!reloaded.is_subscribed());
    }

    #[test]
    fn test_delivery_survives_reload() {
        let notifier = RecordingNotifier::new(NotificationPermission::Granted, NotificationPermission::Granted);
        let (mut motivation, kv) = make_motivation(notifier.clone(), true);
        let events = motivation.tick(at(5, 9));
        assert_eq!(events.len(), 1);

        let mut reloaded = DailyMotivation::new(kv, &MotivationDefaults::default(), Box::new(notifier));
        assert!(reloaded.tick(at(5, 18)).is_empty());
    }

    #[test]
    fn test_random_message_is_seeded() {
        let a = random_message(&mut StdRng::seed_from_u64(42));
        let b = random_message(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        assert!(is_known(&a));
    }
}
