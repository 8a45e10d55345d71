//! Emergency coping strategies

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CopingStrategy {
    pub title: &'static str,
    pub description: &'static str,
    pub resource_url: &'static str,
}

pub const COPING_STRATEGIES: [CopingStrategy; 4] = [
    CopingStrategy {
        title: "Breathing Exercise",
        description: "4-7-8 breathing technique: Inhale for 4s, hold for 7s, exhale for 8s",
        resource_url: "https://www.youtube.com/watch?v=gz4G31LGyog",
    },
    CopingStrategy {
        title: "Mindfulness",
        description: "Focus on your surroundings. Name 5 things you can see, 4 you can touch, 3 you can hear...",
        resource_url: "https://www.youtube.com/watch?v=ZToicYcHIOU",
    },
    CopingStrategy {
        title: "Quick Distractions",
        description: "Do push-ups, take a cold shower, call a friend, or go for a walk",
        resource_url: "https://www.youtube.com/watch?v=sJ6Gb6a_Hvk",
    },
    CopingStrategy {
        title: "Motivational Video",
        description: "Watch an inspiring video to strengthen your resolve",
        resource_url: "https://www.youtube.com/watch?v=mgmVOuLgFB0",
    },
];

pub const EMERGENCY_HEADLINE: &str = "Stay Strong!";

pub const EMERGENCY_REMINDER: &str = "Remember: This urge is temporary. You are stronger than you think.";
