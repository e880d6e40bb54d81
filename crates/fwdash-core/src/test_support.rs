//! Posting builder shared by the unit tests of this crate.

use chrono::DateTime;

use crate::postings::{
    Company, ExperienceLevel, JobCategory, JobPosting, Location, RemoteMode, Skill,
};

pub(crate) struct PostingBuilder(JobPosting);

pub(crate) fn posting(id: &str) -> PostingBuilder {
    PostingBuilder(JobPosting {
        id: id.to_string(),
        published_at: DateTime::parse_from_rfc3339("2024-01-01T10:00:00+01:00").unwrap(),
        title: format!("Mission {id}"),
        daily_salary: None,
        min_daily_salary: None,
        max_daily_salary: None,
        duration: None,
        remote_mode: None,
        experience_level: None,
        skills: Vec::new(),
        soft_skills: Vec::new(),
        company: None,
        location: None,
        job: None,
        slug: None,
    })
}

impl PostingBuilder {
    pub(crate) fn published(mut self, rfc3339: &str) -> Self {
        self.0.published_at = DateTime::parse_from_rfc3339(rfc3339).unwrap();
        self
    }

    pub(crate) fn level(mut self, level: ExperienceLevel) -> Self {
        self.0.experience_level = Some(level);
        self
    }

    pub(crate) fn rates(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.0.min_daily_salary = min;
        self.0.max_daily_salary = max;
        self
    }

    pub(crate) fn daily(mut self, rate: f64) -> Self {
        self.0.daily_salary = Some(rate);
        self
    }

    pub(crate) fn duration(mut self, months: f64) -> Self {
        self.0.duration = Some(months);
        self
    }

    pub(crate) fn remote(mut self, mode: RemoteMode) -> Self {
        self.0.remote_mode = Some(mode);
        self
    }

    pub(crate) fn skills(mut self, names: &[&str]) -> Self {
        self.0.skills = names
            .iter()
            .map(|n| Skill {
                name: (*n).to_string(),
            })
            .collect();
        self
    }

    pub(crate) fn soft_skills(mut self, names: &[&str]) -> Self {
        self.0.soft_skills = names
            .iter()
            .map(|n| Skill {
                name: (*n).to_string(),
            })
            .collect();
        self
    }

    pub(crate) fn company(mut self, name: &str) -> Self {
        self.0.company = Some(Company {
            name: name.to_string(),
        });
        self
    }

    pub(crate) fn locality(mut self, locality: &str) -> Self {
        self.0.location = Some(Location {
            locality: Some(locality.to_string()),
        });
        self
    }

    pub(crate) fn slugs(mut self, job_slug: &str, slug: &str) -> Self {
        self.0.job = Some(JobCategory {
            slug: Some(job_slug.to_string()),
        });
        self.0.slug = Some(slug.to_string());
        self
    }

    pub(crate) fn build(self) -> JobPosting {
        self.0
    }
}
