use std::io::BufRead;

use lumen_core::model::{Language, Preferences, StudyMode, StudyTarget};
use services::{ProfileStore, Rating, SessionLoopService, StudySession};

use super::{require_active, CommandResult};

struct Prompts {
    reveal: &'static str,
    grade: &'static str,
    invalid: &'static str,
    done: &'static str,
}

const EN: Prompts = Prompts {
    reveal: "[press enter to reveal]",
    grade: "1 = known, 2 = unsure, 3 = forgotten, q = quit",
    invalid: "Please enter 1, 2, 3 or q.",
    done: "Session complete",
};

const DE: Prompts = Prompts {
    reveal: "[Enter zum Aufdecken]",
    grade: "1 = gewusst, 2 = unsicher, 3 = vergessen, q = beenden",
    invalid: "Bitte 1, 2, 3 oder q eingeben.",
    done: "Sitzung beendet",
};

enum Answer {
    Rate(Rating),
    Quit,
}

pub async fn run(
    loop_svc: &SessionLoopService,
    store: &mut ProfileStore,
    target: &str,
    mode: Option<StudyMode>,
    prefs: Preferences,
) -> CommandResult {
    require_active(store)?;
    let target: StudyTarget = target.parse()?;
    let mut session = loop_svc.start_session(store, target, mode)?;
    let prompts = match prefs.language {
        Language::En => &EN,
        Language::De => &DE,
    };

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    while let Some(card) = session.current().cloned() {
        let progress = session.progress();
        println!();
        println!(
            "[{}/{} · {}%] Q: {}",
            progress.answered + 1,
            progress.total,
            progress.percent(),
            card.card.front
        );
        if let Some(hint) = &card.card.hint {
            println!("      ({hint})");
        }
        println!("{}", prompts.reveal);
        if lines.next().transpose()?.is_none() {
            return Ok(());
        }
        session.flip();
        println!("A: {}", card.card.back);

        let rating = match read_answer(&mut lines, prompts)? {
            Some(Answer::Rate(rating)) => rating,
            Some(Answer::Quit) | None => {
                log::info!("session abandoned after {} card(s)", progress.answered);
                return Ok(());
            }
        };
        let answer = loop_svc.answer_current(store, &mut session, rating).await?;
        if let Some(result) = answer.result {
            print_summary(&session, prompts, result.known_count, result.total_count);
        }
    }
    Ok(())
}

fn read_answer(
    lines: &mut impl Iterator<Item = std::io::Result<String>>,
    prompts: &Prompts,
) -> std::io::Result<Option<Answer>> {
    loop {
        println!("{}", prompts.grade);
        let Some(line) = lines.next().transpose()? else {
            return Ok(None);
        };
        match line.trim() {
            "1" => return Ok(Some(Answer::Rate(Rating::Known))),
            "2" => return Ok(Some(Answer::Rate(Rating::Unsure))),
            "3" => return Ok(Some(Answer::Rate(Rating::Forgotten))),
            "q" | "Q" => return Ok(Some(Answer::Quit)),
            _ => println!("{}", prompts.invalid),
        }
    }
}

fn print_summary(session: &StudySession, prompts: &Prompts, known: u32, total: u32) {
    let tally = session.tally();
    println!();
    println!("{}: {known}/{total}", prompts.done);
    println!(
        "known {}, unsure {}, forgotten {}",
        tally.known, tally.unsure, tally.forgotten
    );
}
