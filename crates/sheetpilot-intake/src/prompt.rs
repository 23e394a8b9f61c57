//! Extraction prompt.

use std::fmt::Write;

use chrono::NaiveDateTime;

use crate::activity::{ACTIVITIES, DEFAULT_ACTIVITY};

const TASK: &str = r#"Task:
- Interpret the following user instruction as a timesheet submission.
- Working days are always Monday to Friday (unless the user specifies a different range).
- If the user says "Monday to Friday", expand it to include each day with correct dates for the intended week (relative to today).
- If the user provides a date range (e.g., "08/12 to 08/16"), use that exact range instead of assuming the current week.
- Extract project names, activities, and hours worked per day.
- If multiple projects are logged on the same day, represent them as multiple entries in an array.
- If the user mentions "leave", record the entry as { "date": "MM/DD", "day": "Day", "hours": int } (no "activity" field) under "NAW - VDSI Absence".
- Always include the application code if the user provides it.
- If the user says "hashtag" or "hash tag", write the character # instead of the word.
- Example: "XY hash tag 1234 ABC DEF" becomes "XY#1234 ABC DEF".
"#;

const OUTPUT_SHAPE: &str = r#"Output JSON strictly in this format:

{
    "application_code": "string",
    "monday": [
        { "date": "MM/DD", "day": "Mon", "project": "Project Name", "hours": int, "activity": "int" }
    ],
    "tuesday": [],
    "wednesday": [],
    "thursday": [],
    "friday": [],
    "NAW - VDSI Absence": [
        { "date": "MM/DD", "day": "Day", "hours": int }
    ]
}

Example Output:
{
    "application_code": "19572",
    "monday": [
        { "date": "09/01", "day": "Mon", "project": "BC#452 Data Synchronisation", "hours": 8, "activity": "4" }
    ],
    "tuesday": [
        { "date": "09/02", "day": "Tue", "project": "BC#736 Edge Automation", "hours": 8, "activity": "5" }
    ],
    "wednesday": [
        { "date": "09/03", "day": "Wed", "project": "AZ#0912 Site Builder", "hours": 8, "activity": "1" }
    ],
    "thursday": [
        { "date": "09/04", "day": "Thu", "project": "CR#76311 Circuit Screen", "hours": 8, "activity": "9" }
    ],
    "friday": [
        { "date": "09/05", "day": "Fri", "project": "BC#8922 Equipment Built", "hours": 4, "activity": "11" }
    ],
    "NAW - VDSI Absence": [{ "date": "09/05", "day": "Fri", "hours": 4 }]
}
"#;

const RULES: &str = r#"Rules:
- Each weekday key (monday to friday) must be included, even if no work is reported (use [] for that day).
- Dates must always match the user's specified range, or default to the current week if unspecified.
- If multiple projects are logged on a single day, keep them in the same day's array.
- "activity" must always be included for working project entries, but omitted for leave entries.
- "NAW - VDSI Absence" must only list leave days (full or partial, 4 or 8 hours per day).
- Hours must always be integers.
- Do not invent projects, activities, or codes; only use what the user provides. If the user specifies a custom activity, match it to the closest valid activity option.
- If the user gives relative terms like "today", "yesterday", "last week", or "next week", resolve them into exact dates using the system context.
"#;

/// Build the extraction prompt for `text`, anchored at `now`.
///
/// Relative dates in the instruction ("last week", "yesterday") are
/// resolved by the model against the weekday, date and time given here.
pub fn build_prompt(text: &str, now: NaiveDateTime) -> String {
    let mut prompt = String::with_capacity(6 * 1024);

    prompt.push_str("You are an assistant for timesheet submission.\n\n");
    // Writing into a String cannot fail.
    let _ = writeln!(
        prompt,
        "Current system context:\n- Today is {}, {}.\n- Current time is {}.\n",
        now.format("%A"),
        now.format("%m/%d/%Y"),
        now.format("%H:%M"),
    );

    prompt.push_str(TASK);
    let _ = writeln!(
        prompt,
        "- Match activities to the closest valid option from the list below. \
         If there is no close match, use \"{DEFAULT_ACTIVITY}\".\n\
         - Do not include any explanations, notes, or extra text outside the JSON.\n\
         - Output only the JSON.\n"
    );

    prompt.push_str("Activity Options (must map to one of these, or closest match):\n");
    for activity in &ACTIVITIES {
        let _ = writeln!(
            prompt,
            "- {{\"key\":\"{}\",\"value\":\"{}\"}}",
            activity.name, activity.code
        );
    }
    prompt.push('\n');

    prompt.push_str(OUTPUT_SHAPE);
    prompt.push('\n');
    prompt.push_str(RULES);
    prompt.push('\n');

    let _ = writeln!(prompt, "User input: {}", text.trim());
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sunday_afternoon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 8, 24)
            .unwrap()
            .and_hms_opt(13, 45, 0)
            .unwrap()
    }

    #[test]
    fn test_prompt_carries_date_context() {
        let prompt = build_prompt("8 hours build on BC#1", sunday_afternoon());
        assert!(prompt.contains("Today is Sunday, 08/24/2025."));
        assert!(prompt.contains("Current time is 13:45."));
    }

    #[test]
    fn test_prompt_lists_every_activity() {
        let prompt = build_prompt("x", sunday_afternoon());
        for activity in &ACTIVITIES {
            let line = format!("{{\"key\":\"{}\",\"value\":\"{}\"}}", activity.name, activity.code);
            assert!(prompt.contains(&line), "missing {}", activity.name);
        }
    }

    #[test]
    fn test_prompt_rules() {
        let prompt = build_prompt("x", sunday_afternoon());
        assert!(prompt.contains("\"NAW - VDSI Absence\""));
        assert!(prompt.contains("use \"Training Conference\""));
        assert!(prompt.contains("Hours must always be integers."));
        assert!(prompt.contains("write the character #"));
        assert!(prompt.contains("\"tuesday\": []"));
    }

    #[test]
    fn test_user_input_is_last() {
        let prompt = build_prompt("  Monday 8 hours on XY#12, build  ", sunday_afternoon());
        assert!(prompt.trim_end().ends_with("User input: Monday 8 hours on XY#12, build"));
    }
}
