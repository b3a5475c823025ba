mod donation_worker;

pub use donation_worker::DonationWorker;
