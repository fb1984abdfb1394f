//! Plain-text rendering of the dashboard panels.

use skycast_core::timefmt::{DateStyle, INVALID_DATE, format_unix};
use skycast_core::{Banner, BannerPhase, CurrentWeather, Dashboard, DayGroups, Panel, WeatherSample};

/// Meters per second to kilometers per hour.
const MPS_TO_KMH: f64 = 3.6;

/// Render the whole dashboard as one block of text.
pub fn dashboard(dash: &Dashboard) -> String {
    let mut out = String::new();

    if let Some(line) = dash.banner().and_then(banner_line) {
        out.push_str(&line);
        out.push('\n');
    }

    match dash.current() {
        Panel::Ready(current) => out.push_str(&current_card(current)),
        Panel::Failed(_) => out.push_str("  No current weather.\n"),
        Panel::Loading => out.push_str("  Loading current weather...\n"),
        Panel::Idle => {}
    }

    match dash.forecast() {
        Panel::Ready(groups) if !groups.is_empty() => {
            out.push('\n');
            out.push_str(&day_row(groups, dash.active_day()));
            if let Some(day) = dash.active_day() {
                out.push('\n');
                out.push_str(&detail_lines(day, dash.active_samples()));
            }
        }
        Panel::Ready(_) => out.push_str("  No forecast days.\n"),
        Panel::Failed(_) => out.push_str("  No forecast.\n"),
        Panel::Loading => out.push_str("  Loading forecast...\n"),
        Panel::Idle => {}
    }

    out
}

fn banner_line(banner: &Banner) -> Option<String> {
    match banner.phase() {
        BannerPhase::Visible => Some(format!("  !  {}", banner.message())),
        BannerPhase::Hiding => Some(format!("  .  {}", banner.message())),
        BannerPhase::Expired => None,
    }
}

fn current_card(current: &CurrentWeather) -> String {
    let weather = &current.weather;
    let mut out = String::new();

    // `country` holds the flag URL after the post-fetch rewrite.
    out.push_str(&format!("  Hello, {}!  [{}]\n", current.location.city, current.location.country));
    out.push_str(&format!("  {:.0}° {} ({})\n", weather.temp, weather.weather, weather.description));
    out.push_str(&format!(
        "  feels like {:.0}°   wind {:.1} km/h   humidity {}%\n",
        weather.feels_like,
        weather.wind_speed * MPS_TO_KMH,
        weather.humidity,
    ));
    out.push_str(&format!("  updated {}\n", sample_time(weather)));

    out
}

/// One cell per forecast day. `>` marks the active day; without an active
/// day every cell is marked.
fn day_row(groups: &DayGroups, active: Option<&str>) -> String {
    let cells: Vec<String> = groups
        .day_cards()
        .map(|(label, sample)| {
            let marker = if is_active(active, label) { ">" } else { " " };
            format!("{marker}{label} {temp:.0}° {cond}", temp = sample.temp, cond = sample.weather)
        })
        .collect();

    format!("  {}\n", cells.join("  |  "))
}

fn detail_lines(day: &str, samples: &[WeatherSample]) -> String {
    let mut out = format!("  {day} in detail:\n");
    for sample in samples {
        out.push_str(&format!(
            "    {time}  {temp:.0}° {cond} ({desc})\n",
            time = sample_time(sample),
            temp = sample.temp,
            cond = sample.weather,
            desc = sample.description,
        ));
    }
    out
}

fn is_active(active: Option<&str>, label: &str) -> bool {
    match active {
        None => true,
        Some(day) => day.eq_ignore_ascii_case(label),
    }
}

fn sample_time(sample: &WeatherSample) -> String {
    sample
        .dt
        .map(|dt| format_unix(dt, DateStyle::ClockAmPm))
        .unwrap_or_else(|| INVALID_DATE.to_string())
}
