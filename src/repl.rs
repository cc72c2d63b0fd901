//! Line-based terminal front end for the incremental search
//!
//! Each submitted line replaces the query text; an empty line is the commit
//! key. Lookups keep running while the next line is typed and are rendered as
//! they finish.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::Result;
use crate::models::PlaceSuggestion;
use crate::search::{Event, SearchSession, SearchState};
use crate::weather::WeatherLookup;

pub const HELP: &str = "Type a place name and press Enter to see suggestions. \
Press Enter on an empty line to search, #N to pick suggestion N, \
:cards to list results, :quit to leave.";

#[derive(Debug, PartialEq)]
enum Input {
    Text(String),
    Commit,
    Pick(usize),
    Cards,
    Quit,
}

fn parse_input(line: &str) -> Input {
    let line = line.strip_suffix('\r').unwrap_or(line);
    match line {
        "" => Input::Commit,
        ":quit" | ":q" => Input::Quit,
        ":cards" => Input::Cards,
        _ => line
            .strip_prefix('#')
            .and_then(|n| n.trim().parse::<usize>().ok())
            .map_or_else(|| Input::Text(line.to_string()), Input::Pick),
    }
}

/// What has already been printed, to only render changes
#[derive(Default)]
struct Screen {
    suggestions: Vec<PlaceSuggestion>,
    cards: usize,
}

impl Screen {
    fn render<L: WeatherLookup, W: Write>(
        &mut self,
        session: &mut SearchSession<'_, L>,
        output: &mut W,
    ) -> Result<()> {
        for notice in session.take_notices() {
            writeln!(output, "! {notice}")?;
        }

        let state = session.state();
        if state.suggestions() != self.suggestions.as_slice() {
            for (index, suggestion) in state.suggestions().iter().enumerate() {
                let subtext = suggestion.subtext();
                if subtext.is_empty() {
                    writeln!(output, "  {}. {}", index + 1, suggestion.name)?;
                } else {
                    writeln!(output, "  {}. {} ({})", index + 1, suggestion.name, subtext)?;
                }
            }
            self.suggestions = state.suggestions().to_vec();
        }

        let cards = state.cards().len();
        if cards > self.cards {
            if let Some(card) = state.cards().next() {
                writeln!(output, "+ {card}")?;
            }
        }
        self.cards = cards;

        output.flush()?;
        Ok(())
    }
}

/// Run the interactive search until `:quit` or end of input.
///
/// At end of input, lookups still running are allowed to finish.
pub async fn run<L, R, W>(lookup: &L, state: SearchState, input: R, mut output: W) -> Result<()>
where
    L: WeatherLookup,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut session = SearchSession::new(lookup, state);
    let mut screen = Screen::default();
    let mut lines = input.lines();

    writeln!(output, "{HELP}")?;

    loop {
        tokio::select! {
            biased;

            _ = session.next_completion(), if session.in_flight() > 0 => {}

            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let input = parse_input(&line);
                if input == Input::Quit {
                    break;
                }
                handle_input(&mut session, input, &mut output)?;
            }
        }
        screen.render(&mut session, &mut output)?;
    }

    session.settle().await;
    screen.render(&mut session, &mut output)?;
    Ok(())
}

fn handle_input<L: WeatherLookup, W: Write>(
    session: &mut SearchSession<'_, L>,
    input: Input,
    output: &mut W,
) -> Result<()> {
    if input == Input::Cards {
        if session.state().cards().len() == 0 {
            writeln!(output, "(no results yet)")?;
        }
        for card in session.state().cards() {
            writeln!(output, "  {card}")?;
        }
        return Ok(());
    }

    if session.state().is_loading() {
        writeln!(output, "(busy, please wait)")?;
        return Ok(());
    }

    match input {
        Input::Text(text) => session.submit(Event::TextChanged(text)),
        Input::Commit => {
            let query = session.state().query().to_string();
            session.submit(Event::CommitRequested(query));
        }
        Input::Pick(number) => {
            let picked = number
                .checked_sub(1)
                .and_then(|index| session.state().suggestions().get(index))
                .cloned();
            match picked {
                Some(suggestion) => session.submit(Event::SuggestionSelected(suggestion)),
                None => writeln!(output, "No suggestion #{number}")?,
            }
        }
        Input::Cards | Input::Quit => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CurrentConditions, Location};
    use crate::WeatherDeskError;

    struct CannedLookup;

    impl WeatherLookup for CannedLookup {
        async fn suggest(&self, name: &str) -> Result<Vec<PlaceSuggestion>> {
            if name == "Nowhere" {
                return Err(WeatherDeskError::suggestion(name, "boom"));
            }
            Ok(vec![
                PlaceSuggestion {
                    name: "London".to_string(),
                    admin_region: Some("England".to_string()),
                    country: Some("United Kingdom".to_string()),
                    latitude: 51.5,
                    longitude: -0.12,
                },
                PlaceSuggestion {
                    name: "London".to_string(),
                    admin_region: Some("Ontario".to_string()),
                    country: Some("Canada".to_string()),
                    latitude: 42.98,
                    longitude: -81.23,
                },
            ])
        }

        async fn resolve(&self, name: &str) -> Result<Option<Location>> {
            if name == "Atlantis" {
                return Ok(None);
            }
            Ok(Some(Location::new(51.5, -0.12, name.to_string())))
        }

        async fn current_conditions(&self, _location: &Location) -> Result<CurrentConditions> {
            Ok(CurrentConditions {
                temperature: 14.6,
                weather_code: 61,
            })
        }
    }

    async fn transcript(script: &str) -> String {
        let mut output = Vec::new();
        run(&CannedLookup, SearchState::default(), script.as_bytes(), &mut output)
            .await
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input(""), Input::Commit);
        assert_eq!(parse_input("\r"), Input::Commit);
        assert_eq!(parse_input("#2"), Input::Pick(2));
        assert_eq!(parse_input("# 3"), Input::Pick(3));
        assert_eq!(parse_input("#x"), Input::Text("#x".to_string()));
        assert_eq!(parse_input(":cards"), Input::Cards);
        assert_eq!(parse_input(":q"), Input::Quit);
        assert_eq!(parse_input("Lon"), Input::Text("Lon".to_string()));
    }

    #[tokio::test]
    async fn test_type_then_pick() {
        let out = transcript("Lon\n#2\n:cards\n").await;
        assert!(out.contains("  1. London (England, United Kingdom)\n"));
        assert!(out.contains("  2. London (Ontario, Canada)\n"));
        assert!(out.contains("+ London  15°C  Rain\n"));
        assert!(out.ends_with("  London  15°C  Rain\n"));
    }

    #[tokio::test]
    async fn test_short_text_shows_nothing() {
        let out = transcript("Lo\n:quit\n").await;
        assert!(!out.contains("1. London"));
    }

    #[tokio::test]
    async fn test_enter_commits_typed_text() {
        let out = transcript("Lo\n\n").await;
        assert!(out.contains("+ Lo  15°C  Rain\n"));
    }

    #[tokio::test]
    async fn test_not_found_notice() {
        let out = transcript("Atlantis\n\n:cards\n").await;
        assert!(out.contains("! City not found! Please check your spelling.\n"));
        assert!(out.contains("(no results yet)"));
    }

    #[tokio::test]
    async fn test_suggestion_failure_is_silent() {
        let out = transcript("Nowhere\n").await;
        assert!(!out.contains('!'));
    }

    #[tokio::test]
    async fn test_pick_out_of_range() {
        let out = transcript("#4\n#0\n").await;
        assert!(out.contains("No suggestion #4"));
        assert!(out.contains("No suggestion #0"));
    }
}
