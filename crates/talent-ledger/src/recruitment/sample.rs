//! Demo dataset: six candidates, six openings, eight applications.

use super::domain::{skill_set, ApplicationStatus, Job, JobRounds, JobTitle, Person, Phone};
use super::error::LedgerError;
use super::workspace::Workspace;

struct SamplePerson {
    name: &'static str,
    phone: &'static str,
    email: &'static str,
    address: &'static str,
    school: &'static str,
    degree: &'static str,
    skills: &'static [&'static str],
}

const PERSONS: [SamplePerson; 6] = [
    SamplePerson {
        name: "Alex Yeoh",
        phone: "87438807",
        email: "alexyeoh@example.com",
        address: "Blk 30 Geylang Street 29, #06-40",
        school: "NUS",
        degree: "Computer Science",
        skills: &["datascience", "python"],
    },
    SamplePerson {
        name: "Bernice Yu",
        phone: "99272758",
        email: "berniceyu@example.com",
        address: "Blk 30 Lorong 3 Serangoon Gardens, #07-18",
        school: "NUS",
        degree: "Information Systems",
        skills: &["flutter", "javascript"],
    },
    SamplePerson {
        name: "Charlotte Oliveiro",
        phone: "93210283",
        email: "charlotte@example.com",
        address: "Blk 11 Ang Mo Kio Street 74, #11-04",
        school: "NTU",
        degree: "Business Analytics",
        skills: &["python"],
    },
    SamplePerson {
        name: "David Li",
        phone: "91031282",
        email: "lidavid@example.com",
        address: "Blk 436 Serangoon Gardens Street 26, #16-43",
        school: "NTU",
        degree: "Mathematics",
        skills: &["java"],
    },
    SamplePerson {
        name: "Irfan Ibrahim",
        phone: "92492021",
        email: "irfan@example.com",
        address: "Blk 47 Tampines Street 20, #17-35",
        school: "SMU",
        degree: "Business",
        skills: &["clang"],
    },
    SamplePerson {
        name: "Roy Balakrishnan",
        phone: "92624417",
        email: "royb@example.com",
        address: "Blk 45 Aljunied Street 85, #11-31",
        school: "SMU",
        degree: "Political Science",
        skills: &["awscertified"],
    },
];

const JOBS: [(&str, u8, &[&str]); 6] = [
    ("Software Engineer", 5, &["java", "springboot", "microservices"]),
    ("Data Scientist", 4, &["python", "ml", "tensorflow"]),
    ("Product Manager", 3, &["agile", "planning"]),
    ("UX Designer", 3, &["figma", "research", "framing"]),
    ("DevOps Engineer", 4, &["aws", "kubernetes", "ci/cd"]),
    ("Full Stack Developer", 4, &["react", "node.js", "mongodb"]),
];

/// (person index, job index, status)
const APPLICATIONS: [(usize, usize, u8); 8] = [
    (0, 0, 2),
    (1, 1, 3),
    (2, 2, 1),
    (3, 3, 2),
    (4, 4, 1),
    (5, 5, 3),
    (0, 1, 1),
    (1, 0, 4),
];

pub fn persons() -> Result<Vec<Person>, LedgerError> {
    PERSONS
        .iter()
        .map(|sample| {
            Ok(Person {
                name: sample.name.to_string(),
                phone: Phone::new(sample.phone)?,
                email: sample.email.to_string(),
                address: sample.address.to_string(),
                school: sample.school.to_string(),
                degree: sample.degree.to_string(),
                skills: skill_set(sample.skills.iter().copied())?,
            })
        })
        .collect()
}

pub fn jobs() -> Result<Vec<Job>, LedgerError> {
    JOBS.iter()
        .map(|(title, rounds, skills)| {
            Ok(Job {
                title: JobTitle::new(*title)?,
                rounds: JobRounds::new(*rounds)?,
                skills: skill_set(skills.iter().copied())?,
            })
        })
        .collect()
}

/// Builds a workspace holding the demo dataset through the public API.
pub fn workspace() -> Result<Workspace, LedgerError> {
    let mut workspace = Workspace::new();
    let persons = persons()?;
    let jobs = jobs()?;

    for person in &persons {
        workspace.add_person(person.clone())?;
    }
    for job in &jobs {
        workspace.add_job(job.clone())?;
    }
    for (person, job, status) in APPLICATIONS {
        workspace.submit_application(
            &persons[person].phone,
            &jobs[job].title,
            ApplicationStatus::new(status),
        )?;
    }

    Ok(workspace)
}
