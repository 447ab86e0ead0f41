// =============================================================================
// LIGNEE — Point d'entrée : le test en ligne de commande
// =============================================================================
//
// Le binaire joue le rôle de la couche externe :
//   1. charger (et valider) le référentiel depuis --data
//   2. lire / écrire les réponses dans le store JSON --answers
//   3. appeler le cœur de scoring avec un instantané
//   4. rendre le résultat (texte, markdown, svg, résumé)
//
// =============================================================================

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use lignee::core::answers::{AnswerValue, Progress};
use lignee::core::data::QuizData;
use lignee::core::engine::evaluate_with;
use lignee::core::validate::join_errors;
use lignee::render::{MarkdownRenderer, Renderer, SvgRadarRenderer, TextRenderer};
use lignee::store::{AnswerStore, JsonFileStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Markdown,
    Svg,
    Summary,
}

#[derive(Parser)]
#[command(name = "lignee", version, about = "Test de lignée des écoles : scoring, résultat, encyclopédie")]
struct Cli {
    /// Répertoire du référentiel (questions.json, schools.json, ideals.json, encyclopedia.json)
    #[arg(long, default_value = "data", value_name = "DIR", global = true)]
    data: PathBuf,

    /// Fichier JSON des réponses
    #[arg(long, default_value = "answers.json", value_name = "FILE", global = true)]
    answers: PathBuf,

    /// Surcharge du poids de calibration
    #[arg(long, value_name = "W", global = true)]
    calibration_weight: Option<f64>,

    /// Surcharge du seuil relatif de mix
    #[arg(long, value_name = "RATIO", global = true)]
    mix_ratio: Option<f64>,

    /// Surcharge du seuil absolu de mix
    #[arg(long, value_name = "GAP", global = true)]
    mix_gap: Option<f64>,

    /// Verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calcule et affiche le résultat à partir des réponses enregistrées
    Score {
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
        /// Affiche le classement complet (format texte)
        #[arg(long)]
        ranking: bool,
    },
    /// Enregistre la réponse (1..=7) à une question
    Answer { question: String, value: u8 },
    /// Efface toutes les réponses
    Reset,
    /// Affiche l'avancement et la prochaine question
    Progress,
    /// Fiche encyclopédique d'une école (ou l'index si aucune n'est donnée)
    Encyclopedia { school: Option<String> },
    /// Vérifie le référentiel
    Check,
}

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let data = QuizData::load_dir(&cli.data).map_err(|e| e.to_string())?;
    let mut store = JsonFileStore::new(&cli.answers);

    match cli.command {
        Commands::Score { format, ranking } => {
            let options = data
                .options
                .overridden(cli.calibration_weight, cli.mix_ratio, cli.mix_gap);
            options
                .validate()
                .map_err(|errs| format!("options invalides : {}", join_errors(&errs)))?;
            info!(store = store.name(), path = %store.path().display(), "lecture des réponses");
            let result = evaluate_with(&data, &store.load(), &options);
            info!(mix = %result.mix, "résultat calculé");
            let out = match format {
                Format::Summary => TextRenderer::summary(&data, &result),
                other => {
                    let renderer: Box<dyn Renderer> = match other {
                        Format::Markdown => Box::new(MarkdownRenderer::new()),
                        Format::Svg => Box::new(SvgRadarRenderer::default()),
                        _ if ranking => Box::new(TextRenderer::new().with_ranking()),
                        _ => Box::new(TextRenderer::new()),
                    };
                    info!(renderer = renderer.name(), "rendu");
                    renderer.render_result(&data, &result)
                }
            };
            println!("{}", out.trim_end());
        }
        Commands::Answer { question, value } => {
            if data.question(&question).is_none() {
                return Err(format!("question inconnue : '{}'", question));
            }
            let value = AnswerValue::new(value).map_err(|e| e.to_string())?;
            let answers = store.record(&question, value).map_err(|e| e.to_string())?;
            info!(store = store.name(), question = %question, %value, "réponse enregistrée");
            println!("{} = {} ; avancement {}", question, value, Progress::compute(&data.questions, &answers));
        }
        Commands::Reset => {
            store.clear().map_err(|e| e.to_string())?;
            println!("Réponses effacées ({})", store.path().display());
        }
        Commands::Progress => {
            let progress = Progress::compute(&data.questions, &store.load());
            println!("Avancement : {}", progress);
            match progress.first_unanswered {
                Some(i) => {
                    let q = &data.questions[i];
                    println!("\nQuestion {} / {} [{}] ({})", i + 1, progress.total, q.id, q.kind);
                    println!("{}", q.text);
                    println!("  1 = {}   …   7 = {}", q.left, q.right);
                }
                None => println!("Questionnaire terminé : lancez `lignee score`."),
            }
        }
        Commands::Encyclopedia { school } => {
            let md = MarkdownRenderer::new();
            let out = match school {
                Some(id) => md
                    .render_entry(&data, &id)
                    .ok_or_else(|| format!("école inconnue : '{}'", id))?,
                None => md.render_index(&data),
            };
            println!("{}", out.trim_end());
        }
        Commands::Check => {
            println!(
                "Référentiel valide : {} questions, {} axes, {} écoles, {} fiches",
                data.questions.len(),
                data.axes.len(),
                data.schools.len(),
                data.encyclopedia.len()
            );
        }
    }
    Ok(())
}
