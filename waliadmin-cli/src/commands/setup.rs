//! `waliadmin setup show|set`: institution and homeroom profile.

use anyhow::Result;
use clap::{Args, Subcommand};

use waliadmin_core::{InstitutionProfile, SchoolType, Semester};

use super::{home_dir, load_dataset, save_dataset};

#[derive(Subcommand, Debug)]
pub enum SetupCommand {
    /// Print the current profile.
    Show,

    /// Change profile fields. Fields not given keep their value.
    Set(SetArgs),
}

#[derive(Args, Debug)]
pub struct SetArgs {
    #[arg(long)]
    pub school_name: Option<String>,

    /// sekolah | madrasah | pesantren
    #[arg(long)]
    pub school_type: Option<SchoolType>,

    /// e.g. "SMP/MTs"
    #[arg(long)]
    pub school_level: Option<String>,

    /// e.g. "2024/2025"
    #[arg(long)]
    pub academic_year: Option<String>,

    /// ganjil | genap
    #[arg(long)]
    pub semester: Option<Semester>,

    #[arg(long)]
    pub class_name: Option<String>,

    #[arg(long)]
    pub teacher_name: Option<String>,

    #[arg(long)]
    pub teacher_nip: Option<String>,

    #[arg(long)]
    pub principal_name: Option<String>,

    #[arg(long)]
    pub principal_nip: Option<String>,

    #[arg(long)]
    pub curriculum: Option<String>,

    #[arg(long)]
    pub school_address: Option<String>,
}

impl SetArgs {
    fn is_empty(&self) -> bool {
        self.school_name.is_none()
            && self.school_type.is_none()
            && self.school_level.is_none()
            && self.academic_year.is_none()
            && self.semester.is_none()
            && self.class_name.is_none()
            && self.teacher_name.is_none()
            && self.teacher_nip.is_none()
            && self.principal_name.is_none()
            && self.principal_nip.is_none()
            && self.curriculum.is_none()
            && self.school_address.is_none()
    }

    fn apply(self, profile: &mut InstitutionProfile) {
        fn set(slot: &mut String, value: Option<String>) {
            if let Some(v) = value {
                *slot = v;
            }
        }
        set(&mut profile.school_name, self.school_name);
        if let Some(kind) = self.school_type {
            profile.school_type = kind;
        }
        set(&mut profile.school_level, self.school_level);
        set(&mut profile.academic_year, self.academic_year);
        if let Some(semester) = self.semester {
            profile.semester = semester;
        }
        set(&mut profile.class_name, self.class_name);
        set(&mut profile.teacher_name, self.teacher_name);
        set(&mut profile.teacher_nip, self.teacher_nip);
        set(&mut profile.principal_name, self.principal_name);
        set(&mut profile.principal_nip, self.principal_nip);
        set(&mut profile.curriculum, self.curriculum);
        set(&mut profile.school_address, self.school_address);
    }
}

pub fn run(cmd: SetupCommand) -> Result<()> {
    match cmd {
        SetupCommand::Show => show(),
        SetupCommand::Set(args) => set(args),
    }
}

fn school_type_code(kind: SchoolType) -> &'static str {
    match kind {
        SchoolType::Sekolah => "sekolah",
        SchoolType::Madrasah => "madrasah",
        SchoolType::Pesantren => "pesantren",
    }
}

fn show() -> Result<()> {
    let profile = load_dataset(&home_dir()?)?.setup;
    let or_dash = |s: &str| if s.is_empty() { "-".to_string() } else { s.to_string() };

    println!("School:     {} ({})", or_dash(&profile.school_name), school_type_code(profile.school_type));
    println!("Level:      {}", or_dash(&profile.school_level));
    println!("Address:    {}", or_dash(&profile.school_address));
    println!("Year:       {} semester {}", or_dash(&profile.academic_year), profile.semester);
    println!("Class:      {}", or_dash(&profile.class_name));
    println!("Curriculum: {}", or_dash(&profile.curriculum));
    println!("Teacher:    {} (NIP {})", or_dash(&profile.teacher_name), or_dash(&profile.teacher_nip));
    println!("Principal:  {} (NIP {})", or_dash(&profile.principal_name), or_dash(&profile.principal_nip));
    Ok(())
}

fn set(args: SetArgs) -> Result<()> {
    if args.is_empty() {
        println!("Nothing to change. See `waliadmin setup set --help`.");
        return Ok(());
    }
    let home = home_dir()?;
    let mut dataset = load_dataset(&home)?;
    let mut profile = dataset.setup.clone();
    args.apply(&mut profile);
    dataset.set_profile(profile);
    save_dataset(&home, &dataset)?;
    println!("✓ Updated institution profile");
    Ok(())
}
