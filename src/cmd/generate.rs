use cipherbreak::error::CbResult;
use cipherbreak::key::{SubstitutionKey, TranspositionKey};
use clap::{Args, ValueEnum};
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherKind {
    Substitution,
    Transposition,
    All,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Directory the sample ciphertexts are written into.
    #[arg(short, long, default_value = "data/ciphertexts")]
    pub out_dir: String,

    #[arg(long, value_enum, default_value_t = CipherKind::All)]
    pub kind: CipherKind,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
}

const SUBSTITUTION_TEXTS: &[&str] = &[
    "CRYPTOGRAPHYISTHESCIENCEOFPROTECTINGINFORMATIONBYTRANSFORMINGITINTOANUNREADABLE\
     FORMATCALLEDCIPHERTEXTONLYTHOSEWHOPOSSESSASECRETKEYCANDECIPHERTHEMESSAGE",
    "INTHEWORLDOFSECURITYANDPRIVACYENCRYPTIONPLAYSAVITALROLEBYENSURINGTHATDATAREMAINS\
     SAFEFROMUNAUTHORIZEDACCESSEVENIFINTERCEPTEDDURINGTRANSMISSION",
    "CRYPTANALYSISISTHEARTANDSCIENCEOFBREAKINGCIPHERSWITHOUTKNOWINGTHEKEYEXPERTSUSE\
     VARIOUSTECHNIQUESINCLUDINGFREQUENCYANALYSISANDPATTERNRECOGNITION",
    "HISTORICALLYCRYPTOGRAPHYWASUSEDBYMILITARIESANDGOVERNMENTSTOPROTECTSECRETMESSAGES\
     FROMBEINGINTERCEPTEDBYENEMIESDURINGWARTIMECOMMUNICATIONS",
    "THESTUDYOFCRYPTOGRAPHYINVOLVESMATHEMATICSCOMPUTERSCIENCEANDENGINEERINGTODESIGN\
     SECURECOMMUNICATIONSYSTEMSTHATPROTECTSENSITIVEDATA",
];

const TRANSPOSITION_TEXTS: &[&str] = &[
    "THEQUICKBROWNFOXJUMPSOVERTHELAZYDOG",
    "DEFENDTHEEASTWALLOFTHECASTLE",
    "SENDREINFORCEMENTSIMMEDIATELY",
    "THETREASUREISBEHINDTHEWATERFALL",
    "RETREATTOTHENORTHERNBORDER",
];

const TRANSPOSITION_KEYS: &[&[usize]] = &[
    &[3, 1, 4, 0, 2],
    &[2, 0, 4, 1, 3],
    &[1, 3, 0, 4, 2],
    &[4, 2, 1, 3, 0],
    &[0, 3, 2, 4, 1],
];

pub fn run(args: GenerateArgs) -> CbResult<()> {
    let out = Path::new(&args.out_dir);
    fs::create_dir_all(out)?;

    let mut rng = match args.seed {
        Some(s) => fastrand::Rng::with_seed(s),
        None => fastrand::Rng::new(),
    };

    if matches!(args.kind, CipherKind::Substitution | CipherKind::All) {
        for (i, text) in SUBSTITUTION_TEXTS.iter().enumerate() {
            let key = SubstitutionKey::random(&mut rng);
            let ciphertext = key.encrypt(text);
            let path = out.join(format!("substitution_{:02}.txt", i + 1));
            fs::write(&path, &ciphertext)?;
            info!("Wrote {} ({} chars, key {})", path.display(), text.len(), key);
        }
    }

    if matches!(args.kind, CipherKind::Transposition | CipherKind::All) {
        for (i, (text, ranks)) in TRANSPOSITION_TEXTS
            .iter()
            .zip(TRANSPOSITION_KEYS)
            .enumerate()
        {
            let key = TranspositionKey::new(ranks.to_vec())?;
            let ciphertext = key.encrypt(text);
            let path = out.join(format!("permutation_{:02}.txt", i + 1));
            fs::write(&path, &ciphertext)?;
            info!("Wrote {} (key {})", path.display(), key);
        }
    }

    Ok(())
}
