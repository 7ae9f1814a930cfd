//! Behaviour-driven step definitions driving the recommend CLI scenarios.

use super::helpers::{ResortFiles, StubSnowSourceBuilder, alpine_snow};
use super::*;
use crate::recommend::run_recommend_with;
use powder_core::test_support::StubSnowSource;
use powder_data::SnowCache;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

struct RecommendWorld {
    files: ResortFiles,
    builder: RefCell<StubSnowSourceBuilder>,
    table_missing: RefCell<bool>,
    cli_args: RefCell<Vec<String>>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl RecommendWorld {
    fn new() -> Self {
        Self {
            files: ResortFiles::new(),
            builder: RefCell::new(StubSnowSourceBuilder::new(StubSnowSource::default())),
            table_missing: RefCell::new(false),
            cli_args: RefCell::new(Vec::new()),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn build_command_line(&self) -> Vec<String> {
        let resorts = if *self.table_missing.borrow() {
            self.files.missing()
        } else {
            self.files.resorts()
        };
        let mut argv = vec![
            "powder".to_owned(),
            "recommend".to_owned(),
            format!("--{ARG_RESORTS}"),
            resorts.to_string(),
            format!("--{ARG_CACHE}"),
            self.files.cache().to_string(),
        ];
        argv.extend(self.cli_args.borrow().iter().cloned());
        argv
    }

    fn push_args<const N: usize>(&self, args: [&str; N]) {
        self.cli_args
            .borrow_mut()
            .extend(args.into_iter().map(str::to_owned));
    }

    fn error(&self) -> std::cell::Ref<'_, CliError> {
        std::cell::Ref::map(self.result.borrow(), |result| {
            result
                .as_ref()
                .expect("result recorded")
                .as_ref()
                .expect_err("expected error")
        })
    }

    fn stdout(&self) -> String {
        String::from_utf8(self.stdout.borrow().clone()).expect("stdout utf-8")
    }
}

#[fixture]
fn world() -> RecommendWorld {
    RecommendWorld::new()
}

#[given("the snow service knows Zermatt and Verbier")]
fn snow_service_knows_alps(#[from(world)] world: &RecommendWorld) {
    world
        .builder
        .replace(StubSnowSourceBuilder::new(alpine_snow()));
}

#[given("the resort table is missing")]
fn resort_table_missing(#[from(world)] world: &RecommendWorld) {
    world.table_missing.replace(true);
}

#[given("I ask for Europe")]
fn ask_for_europe(#[from(world)] world: &RecommendWorld) {
    world.push_args(["--continent", "europe"]);
}

#[given("I limit the list to two resorts")]
fn limit_to_two(#[from(world)] world: &RecommendWorld) {
    world.push_args(["--top", "2"]);
}

#[given("I weight only après-ski and cleanliness")]
fn weight_apres_and_cleanliness(#[from(world)] world: &RecommendWorld) {
    world.push_args([
        "--priority",
        "apres_ski=1",
        "--priority",
        "cleanliness=1",
    ]);
}

#[when("I run the recommend command")]
fn run_recommend_command(#[from(world)] world: &RecommendWorld) {
    let invocation = world.build_command_line();
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| match cli.command {
        Command::Recommend(args) => {
            let builder = world.builder.borrow();
            let mut stdout = world.stdout.borrow_mut();
            run_recommend_with(args, &*builder, &mut *stdout)
        }
        Command::Session(_) => panic!("expected recommend command"),
    });
    world.result.replace(Some(outcome));
}

#[then("the ranking lists Verbier then Zermatt")]
fn ranking_verbier_then_zermatt(#[from(world)] world: &RecommendWorld) {
    assert_eq!(
        world.stdout(),
        "Top 2 resorts:\n1. Verbier - Score: 4.36\n2. Zermatt - Score: 3.82\n"
    );
}

#[then("the ranking lists Kitzbühel, Verbier and Zermatt")]
fn ranking_kitzbuehel_first(#[from(world)] world: &RecommendWorld) {
    assert_eq!(
        world.stdout(),
        "Top 3 resorts:\n\
         1. Kitzbühel - Score: 5.00\n\
         2. Verbier - Score: 4.67\n\
         3. Zermatt - Score: 3.83\n"
    );
}

#[then("the snow cache records every European resort")]
fn cache_records_europe(#[from(world)] world: &RecommendWorld) {
    let cache = SnowCache::load(&world.files.cache());
    assert_eq!(cache.len(), 3);
    assert_eq!(cache.get("Verbier"), Some(Some(120)));
    assert_eq!(cache.get("Kitzbühel"), Some(None));
    assert_eq!(cache.get("Vail"), None);
}

#[then("the command fails because the continent is missing")]
fn fails_missing_continent(#[from(world)] world: &RecommendWorld) {
    match &*world.error() {
        CliError::MissingArgument { field, .. } => assert_eq!(*field, ARG_CONTINENT),
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[then("the command fails because the resort table is missing")]
fn fails_missing_table(#[from(world)] world: &RecommendWorld) {
    match &*world.error() {
        CliError::MissingSourceFile { field, .. } => assert_eq!(*field, ARG_RESORTS),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

macro_rules! register_recommend_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/recommend_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: RecommendWorld) {
            let _ = world;
        }
    };
}

register_recommend_scenario!(recommend_equal_weights, "ranking with every rating weighted equally");
register_recommend_scenario!(recommend_chosen_priorities, "ranking with chosen priorities");
register_recommend_scenario!(recommend_missing_continent, "rejecting a missing continent");
register_recommend_scenario!(recommend_missing_table, "rejecting a missing resort table");
