use serde::Serialize;

/// Civic-service category an utterance resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    Reporting,
    Tracking,
    MapView,
    Community,
    Home,
    Pothole,
    Sanitation,
    WaterSupply,
    TaxPayment,
    General,
}

/// A suggested next step the client can render as a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigationAction {
    pub label: &'static str,
    pub target: &'static str,
}

/// Classifier output: canned response plus ordered navigation suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntentReply {
    pub category: ServiceCategory,
    pub response: String,
    pub actions: Vec<NavigationAction>,
}

struct IntentRule {
    category: ServiceCategory,
    keywords: [&'static str; 3],
    response: &'static str,
    actions: &'static [NavigationAction],
}

/// Rules are checked top to bottom; the first group with any keyword
/// present in the utterance wins. Order is part of the contract.
const RULES: [IntentRule; 9] = [
    IntentRule {
        category: ServiceCategory::Reporting,
        keywords: ["report", "complaint", "issue"],
        response: "I can help you report a civic issue! You can file a report directly through our system. Would you like me to take you to the report page?",
        actions: &[
            NavigationAction { label: "Go to Report Page", target: "/report" },
            NavigationAction { label: "Learn More", target: "/guide" },
        ],
    },
    IntentRule {
        category: ServiceCategory::Tracking,
        keywords: ["track", "status", "check"],
        response: "You can track the status of your reported issues in the tracking section. Would you like to view your reports?",
        actions: &[
            NavigationAction { label: "Track Issues", target: "/track" },
            NavigationAction { label: "View All Reports", target: "/viewmap" },
        ],
    },
    IntentRule {
        category: ServiceCategory::MapView,
        keywords: ["map", "view", "location"],
        response: "The map view shows all reported issues in your area. You can see what others have reported and their current status.",
        actions: &[
            NavigationAction { label: "View Map", target: "/viewmap" },
            NavigationAction { label: "Report on Map", target: "/report" },
        ],
    },
    IntentRule {
        category: ServiceCategory::Community,
        keywords: ["community", "group", "forum"],
        response: "Our community section lets you connect with other citizens, join WhatsApp groups, and participate in discussions.",
        actions: &[
            NavigationAction { label: "Join Community", target: "/community" },
            NavigationAction { label: "View Forums", target: "/community" },
        ],
    },
    IntentRule {
        category: ServiceCategory::Home,
        keywords: ["home", "main", "dashboard"],
        response: "Taking you back to the main dashboard where you can access all features.",
        actions: &[NavigationAction { label: "Go Home", target: "/" }],
    },
    IntentRule {
        category: ServiceCategory::Pothole,
        keywords: ["pothole", "road", "street"],
        response: "For pothole reports, we need the exact location and a photo if possible. You can report it directly through our system.",
        actions: &[
            NavigationAction { label: "Report Pothole", target: "/report" },
            NavigationAction { label: "View Road Issues", target: "/viewmap" },
        ],
    },
    IntentRule {
        category: ServiceCategory::Sanitation,
        keywords: ["garbage", "waste", "trash"],
        response: "Garbage collection schedules vary by area. You can check your area's schedule or report missed collections.",
        actions: &[
            NavigationAction { label: "Check Schedule", target: "/services" },
            NavigationAction { label: "Report Issue", target: "/report" },
        ],
    },
    IntentRule {
        category: ServiceCategory::WaterSupply,
        keywords: ["water", "supply", "pipe"],
        response: "Water supply issues should be reported immediately. We can help you file a report with the water department.",
        actions: &[
            NavigationAction { label: "Report Water Issue", target: "/report" },
            NavigationAction { label: "Emergency Contacts", target: "/contacts" },
        ],
    },
    IntentRule {
        category: ServiceCategory::TaxPayment,
        keywords: ["tax", "payment", "property"],
        response: "Property tax payments can be made online through our portal. You can also check due dates and payment history.",
        actions: &[
            NavigationAction { label: "Pay Taxes", target: "/services" },
            NavigationAction { label: "Payment Options", target: "/guide" },
        ],
    },
];

const FALLBACK_ACTIONS: &[NavigationAction] = &[
    NavigationAction { label: "Report an Issue", target: "/report" },
    NavigationAction { label: "Track Reports", target: "/track" },
    NavigationAction { label: "View Community", target: "/community" },
];

/// Map an utterance to a canned reply. Pure and total: every input,
/// including the empty string, produces a reply.
pub fn classify(message: &str) -> IntentReply {
    let normalized = message.to_lowercase();

    for rule in &RULES {
        if rule
            .keywords
            .iter()
            .any(|keyword| normalized.contains(keyword))
        {
            return IntentReply {
                category: rule.category,
                response: rule.response.to_string(),
                actions: rule.actions.to_vec(),
            };
        }
    }

    IntentReply {
        category: ServiceCategory::General,
        response: format!(
            "I understand you're asking about: '{message}'. While I'm powered by AI to help \
             with general queries, for specific city services and reporting, our dedicated \
             sections will give you the best experience. How can I assist you further?"
        ),
        actions: FALLBACK_ACTIONS.to_vec(),
    }
}
