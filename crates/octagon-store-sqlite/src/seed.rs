//! Bundled sample data — a small roster of well-known fighters and a few
//! historical bouts between them, for demos and local development.

use chrono::NaiveDate;
use octagon_core::{
  FighterId,
  fight::NewFight,
  fighter::{NewFighter, Stance, WeightClass},
  store::FightStore as _,
};
use tracing::info;

use crate::{Error, Result, SqliteStore};

struct SeedFighter {
  name:              &'static str,
  nickname:          &'static str,
  weight_class:      WeightClass,
  height_cm:         f64,
  reach_cm:          f64,
  stance:            Stance,
  wins:              u32,
  losses:            u32,
  draws:             u32,
  win_by_ko:         u32,
  win_by_submission: u32,
  win_by_decision:   u32,
}

struct SeedFight {
  fighter1:     &'static str,
  fighter2:     &'static str,
  winner:       Option<&'static str>,
  date:         (i32, u32, u32),
  weight_class: WeightClass,
  rounds:       u8,
  method:       &'static str,
  fight_time:   &'static str,
  event:        &'static str,
}

#[rustfmt::skip]
const FIGHTERS: &[SeedFighter] = &[
  SeedFighter { name: "Jon Jones", nickname: "Bones", weight_class: WeightClass::Heavyweight, height_cm: 193.0, reach_cm: 215.0, stance: Stance::Orthodox, wins: 27, losses: 1, draws: 0, win_by_ko: 10, win_by_submission: 7, win_by_decision: 10 },
  SeedFighter { name: "Islam Makhachev", nickname: "", weight_class: WeightClass::Lightweight, height_cm: 178.0, reach_cm: 178.0, stance: Stance::Orthodox, wins: 24, losses: 1, draws: 0, win_by_ko: 4, win_by_submission: 11, win_by_decision: 9 },
  SeedFighter { name: "Alexander Volkanovski", nickname: "The Great", weight_class: WeightClass::Featherweight, height_cm: 168.0, reach_cm: 178.0, stance: Stance::Orthodox, wins: 25, losses: 3, draws: 0, win_by_ko: 12, win_by_submission: 1, win_by_decision: 12 },
  SeedFighter { name: "Leon Edwards", nickname: "Rocky", weight_class: WeightClass::Welterweight, height_cm: 183.0, reach_cm: 188.0, stance: Stance::Orthodox, wins: 22, losses: 3, draws: 1, win_by_ko: 7, win_by_submission: 2, win_by_decision: 13 },
  SeedFighter { name: "Kamaru Usman", nickname: "The Nigerian Nightmare", weight_class: WeightClass::Welterweight, height_cm: 183.0, reach_cm: 193.0, stance: Stance::Orthodox, wins: 20, losses: 4, draws: 0, win_by_ko: 9, win_by_submission: 1, win_by_decision: 10 },
  SeedFighter { name: "Alex Pereira", nickname: "Poatan", weight_class: WeightClass::LightHeavyweight, height_cm: 193.0, reach_cm: 201.0, stance: Stance::Orthodox, wins: 9, losses: 2, draws: 0, win_by_ko: 7, win_by_submission: 0, win_by_decision: 2 },
  SeedFighter { name: "Israel Adesanya", nickname: "The Last Stylebender", weight_class: WeightClass::Middleweight, height_cm: 193.0, reach_cm: 203.0, stance: Stance::Orthodox, wins: 24, losses: 3, draws: 0, win_by_ko: 15, win_by_submission: 0, win_by_decision: 9 },
  SeedFighter { name: "Zhang Weili", nickname: "Magnum", weight_class: WeightClass::WomensStrawweight, height_cm: 164.0, reach_cm: 157.0, stance: Stance::Orthodox, wins: 24, losses: 3, draws: 0, win_by_ko: 9, win_by_submission: 7, win_by_decision: 8 },
  SeedFighter { name: "Conor McGregor", nickname: "The Notorious", weight_class: WeightClass::Lightweight, height_cm: 175.0, reach_cm: 188.0, stance: Stance::Southpaw, wins: 22, losses: 6, draws: 0, win_by_ko: 19, win_by_submission: 1, win_by_decision: 2 },
  SeedFighter { name: "Khabib Nurmagomedov", nickname: "The Eagle", weight_class: WeightClass::Lightweight, height_cm: 178.0, reach_cm: 178.0, stance: Stance::Orthodox, wins: 29, losses: 0, draws: 0, win_by_ko: 8, win_by_submission: 11, win_by_decision: 10 },
  SeedFighter { name: "Dustin Poirier", nickname: "The Diamond", weight_class: WeightClass::Lightweight, height_cm: 175.0, reach_cm: 183.0, stance: Stance::Orthodox, wins: 29, losses: 8, draws: 0, win_by_ko: 14, win_by_submission: 7, win_by_decision: 8 },
];

#[rustfmt::skip]
const FIGHTS: &[SeedFight] = &[
  SeedFight { fighter1: "Islam Makhachev", fighter2: "Alexander Volkanovski", winner: Some("Islam Makhachev"), date: (2023, 2, 11), weight_class: WeightClass::Lightweight, rounds: 5, method: "Decision (unanimous)", fight_time: "25:00", event: "UFC 284" },
  SeedFight { fighter1: "Leon Edwards", fighter2: "Kamaru Usman", winner: Some("Leon Edwards"), date: (2022, 8, 20), weight_class: WeightClass::Welterweight, rounds: 5, method: "KO (head kick)", fight_time: "4:04", event: "UFC 278" },
  SeedFight { fighter1: "Alex Pereira", fighter2: "Israel Adesanya", winner: Some("Alex Pereira"), date: (2022, 11, 12), weight_class: WeightClass::Middleweight, rounds: 5, method: "TKO", fight_time: "2:01", event: "UFC 281" },
  SeedFight { fighter1: "Israel Adesanya", fighter2: "Alex Pereira", winner: Some("Israel Adesanya"), date: (2023, 4, 8), weight_class: WeightClass::Middleweight, rounds: 5, method: "KO", fight_time: "4:21", event: "UFC 287" },
  SeedFight { fighter1: "Khabib Nurmagomedov", fighter2: "Conor McGregor", winner: Some("Khabib Nurmagomedov"), date: (2018, 10, 6), weight_class: WeightClass::Lightweight, rounds: 5, method: "Submission (neck crank)", fight_time: "3:03", event: "UFC 229" },
  SeedFight { fighter1: "Khabib Nurmagomedov", fighter2: "Dustin Poirier", winner: Some("Khabib Nurmagomedov"), date: (2019, 9, 7), weight_class: WeightClass::Lightweight, rounds: 5, method: "Submission (rear naked choke)", fight_time: "2:06", event: "UFC 242" },
  SeedFight { fighter1: "Dustin Poirier", fighter2: "Conor McGregor", winner: Some("Dustin Poirier"), date: (2021, 1, 23), weight_class: WeightClass::Lightweight, rounds: 3, method: "TKO (punches)", fight_time: "2:32", event: "UFC 257" },
];

/// Insert the bundled roster and fights. A no-op when the fighters table is
/// already populated; returns whether anything was inserted.
pub async fn seed_sample_data(store: &SqliteStore) -> Result<bool> {
  if !store.is_empty().await? {
    return Ok(false);
  }

  let mut ids: Vec<(&'static str, FighterId)> =
    Vec::with_capacity(FIGHTERS.len());

  for seed in FIGHTERS {
    let fighter = store
      .add_fighter(NewFighter {
        name:              seed.name.to_owned(),
        nickname:          (!seed.nickname.is_empty())
          .then(|| seed.nickname.to_owned()),
        weight_class:      seed.weight_class,
        height_cm:         Some(seed.height_cm),
        reach_cm:          Some(seed.reach_cm),
        stance:            Some(seed.stance),
        wins:              seed.wins,
        losses:            seed.losses,
        draws:             seed.draws,
        win_by_ko:         seed.win_by_ko,
        win_by_submission: seed.win_by_submission,
        win_by_decision:   seed.win_by_decision,
      })
      .await?;
    ids.push((seed.name, fighter.id));
  }

  let id_of = |name: &str| -> Result<FighterId> {
    ids
      .iter()
      .find(|(n, _)| *n == name)
      .map(|(_, id)| *id)
      .ok_or_else(|| Error::UnknownFighterName(name.to_owned()))
  };

  for seed in FIGHTS {
    let (y, m, d) = seed.date;
    let fight_date = NaiveDate::from_ymd_opt(y, m, d)
      .ok_or_else(|| Error::DateParse(format!("{y}-{m}-{d}")))?;
    store
      .add_fight(NewFight {
        fighter1_id:      id_of(seed.fighter1)?,
        fighter2_id:      id_of(seed.fighter2)?,
        winner_id:        seed.winner.map(|w| id_of(w)).transpose()?,
        fight_date,
        weight_class:     seed.weight_class,
        scheduled_rounds: seed.rounds,
        method:           Some(seed.method.to_owned()),
        fight_time:       Some(seed.fight_time.to_owned()),
        event_name:       seed.event.to_owned(),
      })
      .await?;
  }

  info!(
    fighters = FIGHTERS.len(),
    fights = FIGHTS.len(),
    "seeded sample data"
  );
  Ok(true)
}
