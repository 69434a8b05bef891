//! Built-in demo dataset shown when a collection cannot be read or is empty.

use crate::models::{Club, ExchangeRequest, LeaderboardEntry, RequestStatus, SkillListing};

fn club(
    id: &str,
    name: &str,
    description: &str,
    emoji: &str,
    members: u64,
    gradient: [&str; 2],
    category: &str,
) -> Club {
    Club {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        emoji: emoji.into(),
        category: category.into(),
        gradient: Some([gradient[0].into(), gradient[1].into()]),
        members,
        admin_id: None,
        created_at: None,
    }
}

pub fn clubs() -> Vec<Club> {
    vec![
        club(
            "c1",
            "AI & ML Club",
            "Explore machine learning and AI applications.",
            "🤖",
            120,
            ["#7c3aed", "#4f46e5"],
            "Tech",
        ),
        club(
            "c2",
            "Green Campus",
            "Sustainability and environmental advocacy on campus.",
            "🌱",
            85,
            ["#059669", "#10b981"],
            "Environment",
        ),
        club(
            "c3",
            "Photography Club",
            "Weekly shoots, contests, and darkroom workshops.",
            "📷",
            64,
            ["#f59e0b", "#f97316"],
            "Creative",
        ),
        club(
            "c4",
            "Debate Society",
            "Sharp your speaking and critical thinking skills.",
            "🎙️",
            48,
            ["#dc2626", "#f87171"],
            "Soft Skills",
        ),
        club(
            "c5",
            "Coding League",
            "Competitive programming and hackathon prep.",
            "💻",
            102,
            ["#0369a1", "#38bdf8"],
            "Tech",
        ),
        club(
            "c6",
            "Music Studio",
            "Band practice, sound design, open jam sessions.",
            "🎵",
            56,
            ["#7c3aed", "#c084fc"],
            "Arts",
        ),
    ]
}

fn skill(
    id: &str,
    title: &str,
    author: &str,
    tags: [&str; 2],
    exchanges: u64,
    color: &str,
) -> SkillListing {
    SkillListing {
        id: id.into(),
        title: title.into(),
        author: author.into(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        exchanges,
        color: color.into(),
        ..Default::default()
    }
}

pub fn skills() -> Vec<SkillListing> {
    vec![
        skill("s1", "UI/UX Design", "Arjun K", ["Design", "Figma"], 12, "#ede9fe"),
        skill("s2", "React Development", "Priya S", ["Tech", "JavaScript"], 9, "#dcfce7"),
        skill("s3", "Photography", "Rahul V", ["Creative", "Lightroom"], 7, "#fef3c7"),
        skill("s4", "Music Production", "Sneha M", ["Arts", "Ableton"], 5, "#fee2e2"),
        skill("s5", "Public Speaking", "Dev R", ["Soft Skills", "Leadership"], 11, "#ede9fe"),
        skill("s6", "Machine Learning", "Kay P", ["AI", "Python"], 8, "#dcfce7"),
    ]
}

fn request(
    id: &str,
    from: &str,
    skill: &str,
    skill_id: &str,
    message: &str,
    status: RequestStatus,
    created_at: &str,
) -> ExchangeRequest {
    ExchangeRequest {
        id: id.into(),
        from: from.into(),
        skill: skill.into(),
        skill_id: Some(skill_id.into()),
        requester_id: None,
        message: message.into(),
        status,
        created_at: Some(created_at.into()),
    }
}

pub fn requests() -> Vec<ExchangeRequest> {
    vec![
        request(
            "r1",
            "Priya S",
            "UI/UX Design",
            "s1",
            "Can you teach me Figma basics?",
            RequestStatus::Pending,
            "2 hrs ago",
        ),
        request(
            "r2",
            "Rahul V",
            "React Dev",
            "s2",
            "Need help with React hooks.",
            RequestStatus::Accepted,
            "1 day ago",
        ),
        request(
            "r3",
            "Dev R",
            "Photography",
            "s3",
            "Want to learn portrait lighting.",
            RequestStatus::Pending,
            "3 days ago",
        ),
    ]
}

fn entry(
    id: &str,
    name: &str,
    initials: &str,
    color: &str,
    skills: u64,
    exchanges: u64,
    points: u64,
) -> LeaderboardEntry {
    LeaderboardEntry {
        id: id.into(),
        name: name.into(),
        initials: initials.into(),
        color: color.into(),
        skills,
        exchanges,
        points,
    }
}

pub fn leaderboard() -> Vec<LeaderboardEntry> {
    vec![
        entry("l1", "Arjun Kumar", "AK", "#7c3aed", 12, 48, 980),
        entry("l2", "Priya Sharma", "PS", "#059669", 9, 36, 845),
        entry("l3", "Rahul Verma", "RV", "#f59e0b", 7, 29, 712),
        entry("l4", "Sneha M.", "SM", "#dc2626", 6, 22, 634),
        entry("l5", "Dev Rajput", "DR", "#0369a1", 5, 18, 570),
        entry("l6", "Kay Patel", "KP", "#7c3aed", 4, 14, 480),
    ]
}
