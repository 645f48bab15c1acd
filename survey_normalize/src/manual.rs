/*!

# Input payloads and the output schema

This section documents the data shapes the pipeline consumes and produces.
It is reference material only; it contains no code.

## Raw submission payloads

Payloads come from the collection server's export API. Three shapes are
accepted:

- a paginated envelope: `{"count": n, "results": [record, ...]}`
- a bare array of records: `[record, ...]`
- a single record object

A record is one flattened JSON object whose keys are full slash-delimited
question paths, for example:

```json
{
  "meta/instanceID": "uuid:0a1b2c3d-...",
  "_submission_time": "2024-04-30T15:04:05",
  "soilFER_collect/soil_description_sampling/Site_identification/site_id": "GT01-023",
  "soilFER_collect/landcover_description": [ { "...": "..." } ],
  "_attachments": [ {"question_xpath": "...", "download_url": "..."} ]
}
```

The repeated land-cover group, when present, is a JSON array whose elements
again use full question paths as keys. Older form revisions instead store a
single flat dominant-landcover group at the record level.

Because every campaign ran several form revisions, the same logical field can
live under more than one question path. The per-country tables list the
candidate paths in priority order and extraction takes the first present,
non-empty value. A missing answer is never an error; it produces an empty
output column.

## Output schema

Each submission becomes exactly one flat record of 47 columns, in this order:

| group | columns |
|---|---|
| identity | `uuid`, `country_code`, `site_id`, `psu_id`, `province`, `surveyor`, `survey_date`, `submission_time` |
| location | `latitude`, `longitude`, `elevation`, `landform` |
| land-cover summary | `land_cover_types`, `unique_classifications`, `classification_count`, `total_percentage`, `component_count` |
| components 1-4 | `compN_classification`, `compN_percentage`, `compN_details` |
| photos | `download_url_{north,east,south,west}`, `filename_{north,east,south,west}` |
| comments | `comments`, `surveyor_comments` |
| validation | `validation_status`, `is_correct`, `final_classification`, `main_crop_type`, `validator_comments`, `validator_name`, `validation_date`, `workflow_date` |

Notes:

- Only the first four land-cover components get positional columns. Further
  components still count toward `component_count` and `total_percentage`.
- `total_percentage` may exceed 100: overlapping cover categories are normal.
- A component percentage of 0 renders as an empty cell, matching the
  destination sheet's convention for "not recorded".
- `validation_status` always starts at `PENDING`; the remaining validation
  columns start empty and belong to the review dashboard, not the pipeline.
- `workflow_date` is one RFC 3339 UTC timestamp shared by every record of a
  batch.

## Photos

Each site is photographed in the four cardinal directions. For every
direction two independent columns are produced:

- `filename_*`: the canonical name `{record id}-{direction}.jpg` (the
  `uuid:` tag stripped), or empty when no photo answer was recorded;
- `download_url_*`: the public URL of the stored attachment whose
  `question_xpath` matches the photo question, with any trailing
  `?format=json` transport suffix removed, or empty when unmatched.

*/
