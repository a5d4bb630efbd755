use chrono::{DateTime, Local};
use lazy_static::lazy_static;

use crate::models::email::EmailRecord;

type Predicate = fn(&str) -> bool;
type Render = fn(&[EmailRecord], DateTime<Local>) -> String;

/// One dispatch rule: a predicate over the lower-cased message and the
/// renderer that produces the canned answer.
struct Rule {
    name: &'static str,
    matches: Predicate,
    render: Render,
}

lazy_static! {
    // Evaluated top to bottom, first match wins. The order is part of the
    // contract: "how many emails need action today" is a count query, not an
    // action or today query.
    static ref RULES: Vec<Rule> = vec![
        Rule {
            name: "count",
            matches: |m| m.contains("how many") && m.contains("email"),
            render: render_count,
        },
        Rule {
            name: "action",
            matches: |m| m.contains("action") || m.contains("urgent"),
            render: render_action,
        },
        Rule {
            name: "today",
            matches: |m| m.contains("today"),
            render: render_today,
        },
        Rule {
            name: "summary",
            matches: |m| m.contains("summary") || m.contains("summarize"),
            render: render_summaries,
        },
        Rule {
            name: "sender",
            matches: |m| m.contains("from ") || m.contains("sender"),
            render: render_senders,
        },
        Rule {
            name: "greeting",
            matches: |m| m.contains("hello") || m.contains("hi") || m.contains("hey"),
            render: |_, _| GREETING.to_string(),
        },
        Rule {
            name: "help",
            matches: |m| m.contains("help") || m.contains("what can you do"),
            render: |_, _| HELP.to_string(),
        },
    ];
}

/// Selects the canned response for a chat message. Pure and total: every
/// input yields a non-empty string, including an empty message (which falls
/// through to the suggestions fallback) and an empty email list.
pub fn select_response(message: &str, emails: &[EmailRecord]) -> String {
    select_response_at(message, emails, Local::now())
}

/// Same as [`select_response`] with an explicit "now", so date-sensitive
/// rules can be pinned in tests.
pub fn select_response_at(message: &str, emails: &[EmailRecord], now: DateTime<Local>) -> String {
    let lowered = message.to_lowercase();
    for rule in RULES.iter() {
        if (rule.matches)(&lowered) {
            log::debug!("chat message matched rule '{}'", rule.name);
            return (rule.render)(emails, now);
        }
    }
    FALLBACK.to_string()
}

fn render_count(emails: &[EmailRecord], _now: DateTime<Local>) -> String {
    let total = emails.len();
    let summarized = emails.iter().filter(|e| e.summary.is_some()).count();
    let actionable = emails.iter().filter(|e| e.is_actionable()).count();

    let closing = if total > 0 {
        "Would you like me to show you the emails that need your attention?"
    } else {
        "Your inbox is clean! 🎉"
    };

    format!(
        "📊 **Email Overview:**\n• **Total emails:** {total}\n• **Summarized:** {summarized}\n• **Need action:** {actionable}\n\n{closing}"
    )
}

fn render_action(emails: &[EmailRecord], _now: DateTime<Local>) -> String {
    let actionable: Vec<&EmailRecord> = emails.iter().filter(|e| e.is_actionable()).collect();

    if actionable.is_empty() {
        return "✅ **Great news!** No emails require immediate action right now. You're all caught up!".to_string();
    }

    let listed = actionable
        .iter()
        .take(3)
        .map(|e| format!("• **\"{}\"** from {}", e.subject, e.sender))
        .collect::<Vec<_>>()
        .join("\n");

    let remainder = if actionable.len() > 3 {
        format!("...and {} more emails.", actionable.len() - 3)
    } else {
        String::new()
    };

    format!(
        "⚡ **{} emails need your attention:**\n\n{listed}\n\n{remainder}\n\nWould you like me to summarize any of these emails for you?",
        actionable.len()
    )
}

fn render_today(emails: &[EmailRecord], now: DateTime<Local>) -> String {
    // Records with an unparsable received_at are excluded rather than
    // treated as an error.
    let today: Vec<(&EmailRecord, DateTime<Local>)> = emails
        .iter()
        .filter_map(|e| e.received_local().map(|dt| (e, dt)))
        .filter(|(_, dt)| dt.date_naive() == now.date_naive())
        .collect();

    if today.is_empty() {
        return "📭 **No new emails today!** You can focus on other tasks. 🎯".to_string();
    }

    let mut senders: Vec<&str> = Vec::new();
    for (email, _) in &today {
        if !senders.contains(&email.sender.as_str()) {
            senders.push(&email.sender);
        }
        if senders.len() == 3 {
            break;
        }
    }

    // "Latest" is the first record in list order, not the earliest or most
    // recent; the filter does not sort.
    let (first, first_at) = &today[0];

    format!(
        "📅 **Today's email summary:**\n• **{} new emails** received\n• **Top senders:** {}\n• **Latest:** \"{}\" ({})\n\nWould you like me to prioritize them for you?",
        today.len(),
        senders.join(", "),
        first.subject,
        first_at.format("%H:%M:%S")
    )
}

fn render_summaries(emails: &[EmailRecord], _now: DateTime<Local>) -> String {
    if emails.is_empty() {
        return "📝 No emails to summarize right now. Your inbox is empty!".to_string();
    }

    // First five in list order.
    let entries = emails
        .iter()
        .take(5)
        .enumerate()
        .map(|(i, e)| {
            let key_points = e
                .summary
                .as_ref()
                .map(|s| s.key_points.as_str())
                .unwrap_or("Not yet summarized");
            format!("{}. **{}** ({})\n   {}", i + 1, e.subject, e.sender, key_points)
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "📝 **Recent email summaries:**\n\n{entries}\n\nWould you like more details about any of these emails?"
    )
}

fn render_senders(emails: &[EmailRecord], _now: DateTime<Local>) -> String {
    // Counts accumulate in first-seen order; the stable sort keeps that
    // order for equal counts.
    let mut counts: Vec<(String, usize)> = Vec::new();
    for email in emails {
        match counts.iter_mut().find(|(sender, _)| sender == &email.sender) {
            Some((_, count)) => *count += 1,
            None => counts.push((email.sender.clone(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let listed = counts
        .iter()
        .take(5)
        .map(|(sender, count)| format!("• **{sender}** ({count} emails)"))
        .collect::<Vec<_>>()
        .join("\n");

    format!("👥 **Top email senders:**\n\n{listed}\n\nWant me to show emails from a specific sender?")
}

const GREETING: &str = "👋 **Hello there!** I'm your AI email assistant. I can help you:\n\n🔍 **Analyze** your emails and find important ones\n📊 **Summarize** email content and key points\n⚡ **Identify** emails that need action\n📅 **Review** today's or recent emails\n👥 **Filter** emails by sender\n\nWhat would you like to explore first?";

const HELP: &str = "🤖 **I'm here to help you manage your emails!** Here's what I can do:\n\n**📊 Email Analytics:**\n• Count total, unread, and summarized emails\n• Identify emails requiring action\n• Show today's email activity\n\n**🔍 Smart Search:**\n• Find emails by sender, subject, or content\n• Filter by date ranges\n• Locate urgent or important emails\n\n**📝 AI Summaries:**\n• Generate key points from email content\n• Highlight action items and deadlines\n• Provide conversation context\n\n**💡 Smart Suggestions:**\n• Recommend priority emails to read\n• Suggest response templates\n• Identify follow-up opportunities\n\nTry asking: *\"What emails need action?\"* or *\"Summarize today's emails\"*";

const FALLBACK: &str = "🤔 I'd be happy to help you with your emails! Here are some things you can ask me:\n\n💬 **Try asking:**\n• \"How many emails do I have?\"\n• \"What emails need action today?\"\n• \"Show me emails from [sender name]\"\n• \"Summarize my recent emails\"\n• \"What are my top email senders?\"\n\nOr just tell me what you're looking for and I'll help you find it! ✨";
