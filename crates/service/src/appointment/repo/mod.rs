pub mod seaorm;

pub use seaorm::SeaOrmAppointmentRepository;
