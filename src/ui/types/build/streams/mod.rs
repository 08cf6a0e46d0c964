use crate::streams::SampleStream;
use crate::streams::generators::NoisySignalGenerator;
use crate::streams::CsvColumnStream;
use crate::ui::types::build::BuildError;
use crate::ui::types::choices::StreamChoice;

mod csv_column;
mod noisy_signal;

pub fn build_stream(choice: StreamChoice) -> Result<Box<dyn SampleStream>, BuildError> {
    match choice {
        StreamChoice::CsvColumn(p) => {
            let s = CsvColumnStream::try_from(p)?;
            Ok(Box::new(s))
        }
        StreamChoice::NoisySignal(p) => {
            let s = NoisySignalGenerator::try_from(p)?;
            Ok(Box::new(s))
        }
    }
}
