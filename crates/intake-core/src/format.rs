//! Notification formatting for validated submissions.
//!
//! Turns a validated submission into a single delivery-ready text message.
//! Contact notifications use Telegram's HTML dialect with all user content
//! entity-escaped; service-order notifications use the Markdown dialect with
//! budget/deadline codes translated through fixed label tables and a
//! server-generated Tashkent-time timestamp appended.
//!
//! Formatting is total: it never fails for a validated input and always
//! produces a non-empty string.

use chrono::{DateTime, FixedOffset, Utc};

use crate::submission::{ContactSubmission, ServiceOrderSubmission};

/// Placeholder rendered when the optional phone field is absent.
pub const PHONE_NOT_PROVIDED: &str = "Ko'rsatilmagan";

/// Tashkent is fixed at UTC+5; there is no DST to account for.
const TASHKENT_UTC_OFFSET_SECS: i32 = 5 * 3600;

/// Escapes user content for Telegram's HTML parse mode.
///
/// Ampersand is replaced first so already-escaped entities are not produced
/// out of order; the same input always yields the same output.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Renders a contact submission as an HTML-dialect notification.
///
/// Every user-supplied field is escaped before interpolation. A missing
/// phone number renders as [`PHONE_NOT_PROVIDED`].
pub fn format_contact(submission: &ContactSubmission) -> String {
    let phone = submission
        .phone
        .as_deref()
        .map_or_else(|| PHONE_NOT_PROVIDED.to_string(), escape_html);

    format!(
        "🆕 <b>Yangi xabar!</b>\n\
         \n\
         👤 <b>Ism:</b> {name}\n\
         📧 <b>Email:</b> {email}\n\
         📱 <b>Telefon:</b> {phone}\n\
         \n\
         📌 <b>Mavzu:</b> {subject}\n\
         \n\
         💬 <b>Xabar:</b>\n\
         {message}\n\
         \n\
         ━━━━━━━━━━━━━━━━━━\n\
         🌐 ulugdev.uz dan yuborildi",
        name = escape_html(&submission.name),
        email = escape_html(&submission.email),
        phone = phone,
        subject = escape_html(&submission.subject),
        message = escape_html(&submission.message),
    )
}

/// Renders a service order as a Markdown-dialect notification.
///
/// Budget and deadline codes are translated via [`budget_label`] and
/// [`deadline_label`]; `sent_at` is rendered in Tashkent time and appended.
pub fn format_service_order(
    submission: &ServiceOrderSubmission,
    sent_at: DateTime<Utc>,
) -> String {
    format!(
        "🛒 *YANGI BUYURTMA*\n\
         \n\
         ━━━━━━━━━━━━━━━━━━━━\n\
         📦 *Xizmat:* {service}\n\
         ━━━━━━━━━━━━━━━━━━━━\n\
         \n\
         👤 *Mijoz ma'lumotlari:*\n\
         • Ism: {name}\n\
         • Email: {email}\n\
         • Telefon: {phone}\n\
         \n\
         💰 *Loyiha tafsilotlari:*\n\
         • Byudjet: {budget}\n\
         • Muddat: {deadline}\n\
         \n\
         📝 *Xabar:*\n\
         {message}\n\
         \n\
         ━━━━━━━━━━━━━━━━━━━━\n\
         🕐 _{timestamp}_",
        service = submission.service,
        name = submission.name,
        email = submission.email,
        phone = submission.phone,
        budget = budget_label(&submission.budget),
        deadline = deadline_label(&submission.deadline),
        message = submission.message,
        timestamp = tashkent_timestamp(sent_at),
    )
}

/// Translates a budget bracket code to its display label.
///
/// Unrecognized codes pass through verbatim.
pub fn budget_label(code: &str) -> &str {
    match code {
        "100-300" => "$100 - $300",
        "300-500" => "$300 - $500",
        "500-1000" => "$500 - $1,000",
        "1000-2000" => "$1,000 - $2,000",
        "2000+" => "$2,000+",
        other => other,
    }
}

/// Translates a deadline code to its display label.
///
/// Unrecognized codes pass through verbatim.
pub fn deadline_label(code: &str) -> &str {
    match code {
        "1-2-hafta" => "1-2 hafta",
        "2-4-hafta" => "2-4 hafta",
        "1-2-oy" => "1-2 oy",
        "2-3-oy" => "2-3 oy",
        "shoshilinch-emas" => "Shoshilinch emas",
        other => other,
    }
}

/// Formats an instant as `DD.MM.YYYY, HH:MM` in Tashkent time.
fn tashkent_timestamp(sent_at: DateTime<Utc>) -> String {
    let offset = FixedOffset::east_opt(TASHKENT_UTC_OFFSET_SECS).expect("UTC+5 is a valid offset");
    sent_at.with_timezone(&offset).format("%d.%m.%Y, %H:%M").to_string()
}
