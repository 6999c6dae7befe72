//! Terminal styling utilities

use bounty_client::Bounty;

pub fn style_cyan(s: &str) -> String {
    format!("\x1b[36m{}\x1b[0m", s)
}

pub fn style_green(s: &str) -> String {
    format!("\x1b[32m{}\x1b[0m", s)
}

pub fn style_red(s: &str) -> String {
    format!("\x1b[31m{}\x1b[0m", s)
}

pub fn style_yellow(s: &str) -> String {
    format!("\x1b[33m{}\x1b[0m", s)
}

pub fn style_dim(s: &str) -> String {
    format!("\x1b[2m{}\x1b[0m", s)
}

pub fn style_bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

pub fn print_success(msg: &str) {
    println!("{} {}", style_green("✓"), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", style_red("✗"), msg);
}

pub fn print_warning(msg: &str) {
    println!("{} {}", style_yellow("⚠"), msg);
}

pub fn print_info(msg: &str) {
    println!("{} {}", style_cyan("ℹ"), msg);
}

pub fn print_header(title: &str) {
    println!();
    println!("{}", style_bold(title));
    println!("{}", "─".repeat(title.chars().count()));
}

/// Truncate to `max` characters, marking the cut with "..."
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        s.to_string()
    }
}

/// One row per bounty, shared by list, unposted and watch
pub fn print_bounty_table(bounties: &[Bounty]) {
    println!();
    println!(
        "{:<12}  {:<36}  {:>10}  {:<10}  Deadline",
        "ID", "Title", "Value", "Status"
    );
    println!("{}", "─".repeat(86));

    for bounty in bounties {
        let deadline = bounty
            .deadline
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());

        println!(
            "{:<12}  {:<36}  {:>10.2}  {:<10}  {}",
            truncate(&bounty.id, 12),
            truncate(&bounty.title, 36),
            bounty.value,
            bounty.status.as_deref().unwrap_or("-"),
            style_dim(&deadline)
        );
    }

    println!();
    println!("Total bounties: {}", bounties.len());
}

pub fn print_bounty(bounty: &Bounty) {
    println!();
    println!("ID:           {}", style_cyan(&bounty.id));
    println!("Title:        {}", style_bold(&bounty.title));
    println!("Value:        {}", style_green(&format!("{:.2}", bounty.value)));
    println!("Score:        {:.2}", bounty.bounty_score);
    println!("Status:       {}", bounty.status.as_deref().unwrap_or("-"));
    println!("Created by:   @{}", bounty.creating_username);

    if let Some(user) = &bounty.filling_user_id {
        println!("Filled by:    {}", style_yellow(user));
    }
    if let Some(filled) = bounty.filled {
        println!("Filled at:    {}", filled.to_rfc3339());
    }
    if let Some(deadline) = bounty.deadline {
        println!("Deadline:     {}", deadline.to_rfc3339());
    }
    if let Some(tags) = bounty.tags.as_ref().filter(|t| !t.is_empty()) {
        println!("Tags:         {}", tags.join(", "));
    }
    match &bounty.tweet_id {
        Some(tweet) => println!("Tweet:        {}", tweet),
        None => println!("Tweet:        {}", style_dim("not posted")),
    }

    println!();
    println!("{}", bounty.description);
    if let Some(requirements) = &bounty.requirements {
        println!();
        println!("{}", style_bold("Requirements:"));
        println!("{}", requirements);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 12), "short");
        assert_eq!(truncate("exactly-12ch", 12), "exactly-12ch");
        assert_eq!(truncate("a much longer identifier", 12), "a much lo...");
    }
}
