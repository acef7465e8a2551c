use serde::Serialize;

use crate::skills::SkillSet;

// (skill key, certifications). Keys are matched in this order.
const CERTIFICATIONS: &[(&str, &[&str])] = &[
    (
        "python",
        &[
            "Python Institute PCAP",
            "AWS Certified Developer",
            "Google Cloud Professional Developer",
        ],
    ),
    (
        "tensorflow",
        &[
            "Google TensorFlow Developer Certificate",
            "AWS Machine Learning Specialty",
        ],
    ),
    (
        "pytorch",
        &[
            "PyTorch Scholarship Challenge",
            "Deep Learning Specialization (Coursera)",
        ],
    ),
    (
        "aws",
        &[
            "AWS Certified Solutions Architect",
            "AWS Certified Machine Learning Specialty",
        ],
    ),
    (
        "azure",
        &[
            "Microsoft Azure AI Engineer Associate",
            "Microsoft Azure Data Scientist Associate",
        ],
    ),
    (
        "gcp",
        &[
            "Google Cloud Professional ML Engineer",
            "Google Cloud Professional Data Engineer",
        ],
    ),
    (
        "kubernetes",
        &[
            "Certified Kubernetes Administrator (CKA)",
            "Certified Kubernetes Application Developer (CKAD)",
        ],
    ),
    (
        "docker",
        &["Docker Certified Associate", "Kubernetes and Docker Security"],
    ),
    (
        "sql",
        &[
            "Microsoft SQL Server Certification",
            "Oracle Database SQL Certified Associate",
        ],
    ),
    (
        "spark",
        &[
            "Databricks Certified Associate Developer",
            "Cloudera Certified Spark Developer",
        ],
    ),
    (
        "hadoop",
        &[
            "Cloudera Certified Hadoop Developer",
            "Hortonworks Data Platform Certification",
        ],
    ),
    (
        "tableau",
        &[
            "Tableau Desktop Specialist",
            "Tableau Server Certified Associate",
        ],
    ),
    (
        "power bi",
        &[
            "Microsoft Power BI Data Analyst Associate",
            "Microsoft Power Platform Fundamentals",
        ],
    ),
    (
        "r",
        &[
            "R Programming Certification",
            "Data Science with R (Coursera)",
        ],
    ),
    (
        "java",
        &[
            "Oracle Certified Java Developer",
            "Spring Professional Certification",
        ],
    ),
    (
        "scala",
        &[
            "Lightbend Scala Professional",
            "Databricks Certified Associate Developer",
        ],
    ),
    (
        "linux",
        &["CompTIA Linux+", "Red Hat Certified System Administrator"],
    ),
    (
        "git",
        &["GitHub Certified Developer", "GitLab Certified Associate"],
    ),
    (
        "nlp",
        &[
            "Natural Language Processing Specialization",
            "Deep Learning Specialization",
        ],
    ),
    (
        "computer vision",
        &[
            "Computer Vision Specialization",
            "Deep Learning Specialization",
        ],
    ),
    (
        "deep learning",
        &[
            "Deep Learning Specialization (Coursera)",
            "Fast.ai Practical Deep Learning",
        ],
    ),
    (
        "machine learning",
        &[
            "Machine Learning Specialization (Stanford)",
            "AWS Machine Learning Specialty",
        ],
    ),
    (
        "data science",
        &[
            "IBM Data Science Professional Certificate",
            "Google Data Analytics Certificate",
        ],
    ),
    (
        "mlops",
        &[
            "MLOps Specialization (Coursera)",
            "AWS Machine Learning Specialty",
        ],
    ),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CertificationMatch {
    pub skill: String,
    pub certifications: Vec<&'static str>,
}

/// Whether a skill label and a mapping key refer to the same thing.
///
/// Multi-character keys match as substrings in either direction ("Apache Spark" ~ "spark");
/// the single-letter key only matches the label "R" exactly.
fn key_matches(skill: &str, key: &str) -> bool {
    if key.len() == 1 || skill.len() == 1 {
        return skill == key;
    }
    skill.contains(key) || key.contains(skill)
}

/// Maps each skill to the certifications of the first matching mapping key.
/// Skills without a match are omitted.
pub fn certification_recommendations(skills: &SkillSet) -> Vec<CertificationMatch> {
    skills
        .iter()
        .filter_map(|label| {
            let lowered = label.to_lowercase();
            CERTIFICATIONS
                .iter()
                .find(|(key, _)| key_matches(&lowered, key))
                .map(|(_, certs)| CertificationMatch {
                    skill: label.to_string(),
                    certifications: certs.to_vec(),
                })
        })
        .collect()
}
