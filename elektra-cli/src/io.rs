use crate::CliError;
use clap::Args;
use std::{
    fs::File,
    io::{BufReader, BufWriter, ErrorKind, Read, Write, stdin, stdout},
    path::PathBuf,
    str::FromStr,
};

// The request subcommands read one JSON document and write one back.
// This struct standardizes their implementation.
#[derive(Args)]
pub struct IOArgs {
    /// The request JSON file ("-" implies stdin)
    #[arg(default_value = "-", value_parser = clap::value_parser!(PathOrStd))]
    input: PathOrStd,

    #[command(flatten)]
    output: OutputArgs,
}

impl IOArgs {
    pub fn read(&self) -> anyhow::Result<Box<dyn Read>> {
        match &self.input {
            PathOrStd::Path(path) => match File::open(path) {
                Ok(file) => Ok(Box::new(BufReader::new(file))),
                Err(err) if err.kind() == ErrorKind::NotFound => {
                    Err(CliError::MissingInput(path.clone()).into())
                }
                Err(err) => Err(err.into()),
            },
            PathOrStd::Std => Ok(Box::new(stdin().lock())),
        }
    }

    pub fn write(&self) -> anyhow::Result<Box<dyn Write>> {
        self.output.write()
    }
}

// The lookup subcommands take their arguments on the command line and only
// need somewhere to write.
#[derive(Args)]
pub struct OutputArgs {
    /// The output file ("-" implies stdout)
    #[arg(short, long, default_value = "-", value_parser = clap::value_parser!(PathOrStd))]
    output: PathOrStd,
}

impl OutputArgs {
    pub fn write(&self) -> anyhow::Result<Box<dyn Write>> {
        match &self.output {
            PathOrStd::Path(path) => Ok(Box::new(BufWriter::new(File::create(path)?))),
            PathOrStd::Std => Ok(Box::new(stdout().lock())),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum PathOrStd {
    Path(PathBuf),
    Std,
}

impl FromStr for PathOrStd {
    type Err = <PathBuf as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(Self::Std)
        } else {
            Ok(Self::Path(s.parse()?))
        }
    }
}
