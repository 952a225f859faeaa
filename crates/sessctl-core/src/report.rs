use crate::session::Counters;

/// Truncate `value` to `places` decimal places. Truncation, not rounding:
/// the displayed run time never overstates the session length.
fn truncate_float(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).trunc() / factor
}

fn format_run_time(seconds: u64) -> String {
    if seconds < 60 {
        format!("{seconds} seconds")
    } else if seconds < 3600 {
        format!("{} minutes", truncate_float(seconds as f64 / 60.0, 2))
    } else {
        format!("{} hours", truncate_float(seconds as f64 / 3600.0, 2))
    }
}

/// Render the live report sent for `/report` and as the final message at
/// shutdown.
///
/// Pure function of the counter snapshot and the elapsed seconds. The line
/// order is part of the external contract; tests compare exact output.
pub fn compose(counters: &Counters, elapsed_secs: u64) -> String {
    let run_time_msg = format!("[Session lasted {}]", format_run_time(elapsed_secs));

    if counters.is_empty() {
        return format!(
            "Sessional Live Report:\n\
             |> No any statistics to show\n\
             \n{run_time_msg}"
        );
    }

    format!(
        "Sessional Live Report:\n\
         |> LIKED {} images\n\
         |> ALREADY LIKED: {}\n\
         |> COMMENTED on {} images\n\
         |> FOLLOWED {} users\n\
         |> ALREADY FOLLOWED: {}\n\
         |> UNFOLLOWED {} users\n\
         |> LIKED {} comments\n\
         |> REPLIED to {} comments\n\
         |> INAPPROPRIATE images: {}\n\
         |> NOT VALID users: {}\n\
         |> WATCHED {} story(ies)\n\
         |> WATCHED {} reel(s)\n\
         \n{run_time_msg}",
        counters.liked,
        counters.already_liked,
        counters.commented,
        counters.followed,
        counters.already_followed,
        counters.unfollowed,
        counters.liked_comments,
        counters.replied_comments,
        counters.inappropriate,
        counters.invalid_users,
        counters.stories_watched,
        counters.reels_watched,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_counters() -> Counters {
        Counters {
            liked: 12,
            already_liked: 3,
            commented: 4,
            followed: 5,
            already_followed: 6,
            unfollowed: 7,
            liked_comments: 8,
            replied_comments: 9,
            inappropriate: 1,
            invalid_users: 2,
            stories_watched: 10,
            reels_watched: 11,
        }
    }

    #[test]
    fn run_time_under_a_minute_is_integer_seconds() {
        assert_eq!(format_run_time(45), "45 seconds");
        assert_eq!(format_run_time(0), "0 seconds");
        assert_eq!(format_run_time(59), "59 seconds");
    }

    #[test]
    fn run_time_under_an_hour_is_truncated_minutes() {
        assert_eq!(format_run_time(150), "2.5 minutes");
        assert_eq!(format_run_time(60), "1 minutes");
        assert_eq!(format_run_time(3599), "59.98 minutes");
    }

    #[test]
    fn run_time_from_an_hour_is_truncated_hours() {
        assert_eq!(format_run_time(3600), "1 hours");
        assert_eq!(format_run_time(7260), "2.01 hours");
    }

    #[test]
    fn truncation_never_rounds_up() {
        // 7270 / 3600 = 2.0194..; rounding would show 2.02.
        assert_eq!(format_run_time(7270), "2.01 hours");
        // 61 / 60 = 1.0166..; rounding would show 1.02.
        assert_eq!(format_run_time(61), "1.01 minutes");
    }

    #[test]
    fn empty_counters_render_placeholder_body_with_footer() {
        let report = compose(&Counters::default(), 45);
        assert!(report.contains("No any statistics to show"));
        assert!(report.ends_with("[Session lasted 45 seconds]"));
        assert!(!report.contains("LIKED"));
    }

    #[test]
    fn compose_is_pure_and_idempotent() {
        let counters = sample_counters();
        assert_eq!(compose(&counters, 150), compose(&counters, 150));
    }

    #[test]
    fn field_order_is_fixed() {
        let report = compose(&sample_counters(), 7260);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "Sessional Live Report:");
        assert_eq!(lines[1], "|> LIKED 12 images");
        assert_eq!(lines[2], "|> ALREADY LIKED: 3");
        assert_eq!(lines[3], "|> COMMENTED on 4 images");
        assert_eq!(lines[4], "|> FOLLOWED 5 users");
        assert_eq!(lines[5], "|> ALREADY FOLLOWED: 6");
        assert_eq!(lines[6], "|> UNFOLLOWED 7 users");
        assert_eq!(lines[7], "|> LIKED 8 comments");
        assert_eq!(lines[8], "|> REPLIED to 9 comments");
        assert_eq!(lines[9], "|> INAPPROPRIATE images: 1");
        assert_eq!(lines[10], "|> NOT VALID users: 2");
        assert_eq!(lines[11], "|> WATCHED 10 story(ies)");
        assert_eq!(lines[12], "|> WATCHED 11 reel(s)");
        assert_eq!(lines[14], "[Session lasted 2.01 hours]");
    }

    #[test]
    fn single_nonzero_counter_renders_full_body() {
        let counters = Counters {
            liked_comments: 1,
            ..Counters::default()
        };
        let report = compose(&counters, 10);
        assert!(report.contains("|> LIKED 1 comments"));
        assert!(!report.contains("No any statistics to show"));
    }
}
