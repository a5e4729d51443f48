//! Pure job lifecycle rules: which jobs surface in management views, how an
//! edit moves a job through re-approval, and how a recruiter's territory
//! narrows a listing. Everything in here works on already-fetched rows and
//! touches no I/O.

pub mod approval;
pub mod classification;
pub mod scoping;
