mod noisy_signal;

pub use noisy_signal::NoisySignalGenerator;
