// All analysis prompt templates for the review module.
// Placeholders: `{resume}` and `{job_description}`. Substitution happens only in
// catalog::render, which checks the declared slots first.

pub const RESUME_PLACEHOLDER: &str = "{resume}";
pub const JOB_DESCRIPTION_PLACEHOLDER: &str = "{job_description}";

pub const COMPARISON: &str = "Compare the resume: <RESUME STARTS HERE> {resume}. <RESUME ENDS HERE> \
with the job description: <JOB DESCRIPTION STARTS HERE> {job_description}.<JOB DESCRIPTION ENDS HERE> \
Do they match? If not, what are the gaps? Do not make any assumptions about the candidate's skills \
or experience or the job requirements.";

pub const RESUME_ANALYSIS: &str = "Provide a detailed summary of the candidate's skills, experience, \
and qualifications based on the content of the following resume: \
<RESUME STARTS HERE> {resume}. <RESUME ENDS HERE>";

pub const JOB_DESCRIPTION_ANALYSIS: &str = "List the key skills, qualifications, and experience \
required as outlined in the following job description: \
<JOB DESCRIPTION STARTS HERE> {job_description}. <JOB DESCRIPTION ENDS HERE>";

pub const GAP_ANALYSIS: &str = "Compare the skills and experience detailed in this resume: \
<RESUME STARTS HERE> {resume} <RESUME ENDS HERE> with the requirements listed in the job description: \
<JOB DESCRIPTION STARTS HERE> {job_description}. <JOB DESCRIPTION ENDS HERE> \
Identify any gaps or mismatches.";

pub const ACTIONABLE_STEPS: &str = "Given the gaps identified between the resume: \
<RESUME STARTS HERE> {resume} <RESUME ENDS HERE> and the job description: \
<JOB DESCRIPTION STARTS HERE> {job_description} <JOB DESCRIPTION ENDS HERE>, suggest actionable \
steps for the candidate to acquire the necessary skills and experience.";

pub const EXPERIENCE_ENHANCEMENT: &str = "Based on the candidate's experience outlined in this resume: \
<RESUME STARTS HERE> {resume} <RESUME ENDS HERE>, recommend practical activities or steps to gain \
or improve the experience aligned with the needs of this role: \
<JOB DESCRIPTION STARTS HERE> {job_description}. <JOB DESCRIPTION ENDS HERE>";

pub const ADDITIONAL_QUALIFICATIONS: &str = "For areas where this resume: \
<RESUME STARTS HERE> {resume} <RESUME ENDS HERE> falls short or does not satisfy the requirements \
of the job role: <JOB DESCRIPTION STARTS HERE> {job_description} <JOB DESCRIPTION ENDS HERE>, \
suggest specific areas for improvement. Include recommendations for additional qualifications \
or certifications.";

pub const RESUME_TAILORING: &str = "Advise on how the candidate can tailor their resume: \
<RESUME STARTS HERE> {resume} <RESUME ENDS HERE> to align more closely with this job description: \
<JOB DESCRIPTION STARTS HERE> {job_description} <JOB DESCRIPTION ENDS HERE>, focusing on \
emphasizing skills and experiences relevant to the job description.";

pub const RELEVANT_SKILLS_HIGHLIGHT: &str = "Analyze this resume: \
<RESUME STARTS HERE> {resume} <RESUME ENDS HERE> and provide suggestions on restructuring it to \
foreground skills and experiences pertinent to the job description: \
<JOB DESCRIPTION STARTS HERE> {job_description}. <JOB DESCRIPTION ENDS HERE>";

pub const RESUME_FORMATTING: &str = "Offer guidance on how the candidate can enhance the formatting \
of their resume: <RESUME STARTS HERE> {resume} <RESUME ENDS HERE> to improve visual appeal \
and readability.";

pub const RESUME_LENGTH: &str = "Recommend strategies for the candidate to adjust the length of \
their resume: <RESUME STARTS HERE> {resume} <RESUME ENDS HERE>, ensuring it is concise while \
remaining aligned with the requirements in the job description: \
<JOB DESCRIPTION STARTS HERE> {job_description}. <JOB DESCRIPTION ENDS HERE>";

/// Full rewrite of the resume against the job description.
pub const RESUME_EDIT: &str = r#"Tailor this resume: <RESUME STARTS HERE> {resume} <RESUME ENDS HERE> to better match the job description: <JOB DESCRIPTION STARTS HERE> {job_description}. <JOB DESCRIPTION ENDS HERE>
Use the keywords from the job description to enhance the resume. Tailor the summary of the resume according to the job role. Tailor the skills section. Add relevant keywords from the job description in projects. Then print the resume section-wise.

Don't make bullet points too lengthy in job and project descriptions. Keep them short, precise and keyword-rich.
- Start each bullet point with a strong action verb.
- Emphasize quantifiable results whenever possible.
- While not every bullet needs the full STAR method, try to incorporate its principles:
  Situation: briefly set the context. Task: describe the responsibility.
  Action: explain what was done. Result: highlight the positive outcome.
- Conciseness: keep bullet points focused. Avoid overly long sentences.
- Consistency: maintain consistent verb tense and formatting throughout."#;

pub const COVER_LETTER: &str = r#"Generate a professional cover letter based on the following resume and job description:

Resume:
{resume}

Job Description:
{job_description}

The cover letter should be tailored to the job role, highlighting relevant skills and experience. Include details like name, address, email, phone number, LinkedIn, GitHub and personal portfolio from the resume if provided. Add the company address, hiring manager name, company name, job title, city, state and zip code from the job description when present. Set the date as the current date. The cover letter should be concise, engaging, and professional."#;
